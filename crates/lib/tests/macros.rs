#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use cssdelta::{Fs, Logger};

/// Diff `$parent` and `$child` given as text and compare the result
#[macro_export]
macro_rules! test {
    (@base $( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $output:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            let css = cssdelta::from_string($parent, $child, &$options)
                .expect(concat!("failed to diff ", $child));
            assert_eq!(
                String::from($output),
                css
            );
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $output:expr, $options:expr) => {
        test!(@base $(#[$attr])* $func, $parent, $child, $output, $options);
    };
    ($( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $output:expr) => {
        test!(@base $(#[$attr])* $func, $parent, $child, $output, cssdelta::Options::default().silent(true));
    };
}

/// Verify the first line of the error *message*
#[macro_export]
macro_rules! error {
    (@base $( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $err:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            match cssdelta::from_string($parent, $child, &$options) {
                Ok(..) => panic!("did not fail"),
                Err(e) => assert_eq!($err, e.to_string()
                                                .chars()
                                                .take_while(|c| *c != '\n')
                                                .collect::<String>()
                                                .as_str()
                ),
            }
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $err:expr) => {
        error!(@base $(#[$attr])* $func, $parent, $child, $err, cssdelta::Options::default().silent(true));
    };
    ($( #[$attr:meta] ),*$func:ident, $parent:expr, $child:expr, $err:expr, $options:expr) => {
        error!(@base $(#[$attr])* $func, $parent, $child, $err, $options);
    };
}

/// An in-memory file system. Paths are compared as given, with no
/// normalization
#[derive(Debug, Default)]
pub struct TestFs {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

#[allow(unused)]
impl TestFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, name: &'static str, contents: &'static str) {
        self.files
            .get_mut()
            .insert(PathBuf::from(name), contents.as_bytes().to_vec());
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().iter().cloned().collect()
    }
}

impl Fs for TestFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "no such file in TestFs"))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_owned(), contents.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        self.dirs.borrow_mut().insert(path.to_owned());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TestLoggerState {
    info_messages: Vec<String>,
    debug_messages: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TestLogger(RefCell<TestLoggerState>);

#[allow(unused)]
impl TestLogger {
    pub fn info_messages(&self) -> Vec<String> {
        self.0.borrow().info_messages.clone()
    }

    pub fn debug_messages(&self) -> Vec<String> {
        self.0.borrow().debug_messages.clone()
    }
}

impl Logger for TestLogger {
    fn info(&self, message: &str) {
        self.0.borrow_mut().info_messages.push(message.into());
    }

    fn debug(&self, message: &str) {
        self.0.borrow_mut().debug_messages.push(message.into());
    }
}
