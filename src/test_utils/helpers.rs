use std::{env, fs, path::PathBuf};

/// Small parts catalogue used across the integration tests
pub const SAMPLE_DOCUMENT: &str = include_str!("../../tests/input/sample.xml");

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("xmledit_tests");
    // a failure here surfaces as an IO error from the write that follows
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}
