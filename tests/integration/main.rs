//! Integration tests for Image Finder

mod crawl_tests;
