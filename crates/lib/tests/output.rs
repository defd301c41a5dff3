use std::path::{Path, PathBuf};

use cssdelta::{Fs, Input, Options};

#[macro_use]
mod macros;

use macros::TestFs;

fn test_fs() -> TestFs {
    let mut fs = TestFs::new();
    fs.add_file("styles/parent.css", "a { color: red; }");
    fs.add_file("styles/theme.css", "a { color: red; margin: 0; }");
    fs
}

#[test]
fn write_output_creates_the_directory_and_the_file() {
    let fs = test_fs();
    let options = Options::default().fs(&fs).silent(true).output_dir("dist");

    let path = cssdelta::write_output(
        &Input::path("styles/parent.css"),
        &Input::path("styles/theme.css"),
        &options,
    )
    .unwrap();

    assert_eq!(path, Path::new("dist/theme.out.css"));
    assert_eq!(fs.created_dirs(), vec![PathBuf::from("dist")]);
    assert_eq!(
        fs.contents("dist/theme.out.css").as_deref(),
        Some("a {\n  margin: 0;\n}\n")
    );
}

#[test]
fn existing_output_directory_is_reused() {
    let fs = test_fs();
    fs.create_dir_all(Path::new("dist")).unwrap();
    let options = Options::default().fs(&fs).silent(true).output_dir("dist");

    for _ in 0..2 {
        cssdelta::write_output(
            &Input::path("styles/parent.css"),
            &Input::path("styles/theme.css"),
            &options,
        )
        .unwrap();
    }

    assert_eq!(fs.created_dirs().len(), 1);
}

#[test]
fn from_path_reads_through_the_file_system() {
    let fs = test_fs();

    assert_eq!(
        cssdelta::from_path(
            "styles/parent.css",
            "styles/theme.css",
            &Options::default().fs(&fs).silent(true)
        )
        .unwrap(),
        "a {\n  margin: 0;\n}\n"
    );
}

#[test]
fn default_output_path() {
    assert_eq!(
        cssdelta::output_path(&Input::path("styles/theme.css"), &Options::default()),
        Path::new("./out/theme.out.css")
    );
}

#[test]
fn custom_extension_replaces_css() {
    let options = Options::default().output_file_ext(".min.css");

    assert_eq!(
        cssdelta::output_path(&Input::path("theme.css"), &options),
        Path::new("./out/theme.min.css")
    );
}

#[test]
fn empty_extension_keeps_the_name() {
    let options = Options::default().output_file_ext("");

    assert_eq!(
        cssdelta::output_path(&Input::path("theme.css"), &options),
        Path::new("./out/theme.css")
    );
}

#[test]
fn name_without_css_extension_is_kept() {
    assert_eq!(
        cssdelta::output_path(&Input::path("theme.txt"), &Options::default()),
        Path::new("./out/theme.txt")
    );
}

#[test]
fn explicit_file_name() {
    let options = Options::default()
        .output_dir("build")
        .output_filename("delta.css");

    assert_eq!(
        cssdelta::output_path(&Input::path("styles/theme.css"), &options),
        Path::new("build/delta.css")
    );
}

#[test]
fn writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("parent.css");
    let child = dir.path().join("child.css");
    std::fs::write(&parent, "a { color: red; }\nb { color: blue; }").unwrap();
    std::fs::write(&child, "a { color: red; }\nb { color: green; }").unwrap();

    let out_dir = dir.path().join("out");
    let options = Options::default().silent(true).output_dir(&out_dir);

    let path = cssdelta::write_output(&Input::path(&parent), &Input::path(&child), &options).unwrap();

    assert_eq!(path, out_dir.join("child.out.css"));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "b {\n  color: green;\n}\n"
    );
}
