use std::path::Path;

use cssdelta::{Input, Options};
use serde::{Deserialize, Deserializer};

pub const DEFAULT_CONFIG: &str = "./cssdelta.json";
const DEFAULT_PARENT: &str = "./parent.css";
const DEFAULT_CHILD: &str = "./child.css";

/// Settings read from a JSON configuration file and then overridden by
/// command line flags
///
/// Text settings also accept `false`, which means "not set".
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(deserialize_with = "string_or_false")]
    pub parent_file: Option<String>,
    #[serde(deserialize_with = "string_or_false")]
    pub child_file: Option<String>,
    #[serde(rename = "parentCSS", deserialize_with = "string_or_false")]
    pub parent_css: Option<String>,
    #[serde(rename = "childCSS", deserialize_with = "string_or_false")]
    pub child_css: Option<String>,
    #[serde(deserialize_with = "string_or_false")]
    pub output_dir: Option<String>,
    #[serde(deserialize_with = "string_or_false")]
    pub output_filename: Option<String>,
    #[serde(deserialize_with = "string_or_false")]
    pub output_file_ext: Option<String>,
    pub combine_selectors: Option<bool>,
    pub remove_comments: Option<bool>,
    pub comments_same_line: Option<bool>,
    pub remove_empty_lines: Option<bool>,
    pub verbose: Option<bool>,
    pub silent: Option<bool>,
    pub log_result: Option<bool>,
    pub return_string: Option<bool>,
}

fn string_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrBool {
        String(String),
        Bool(bool),
    }

    Ok(match Option::<StringOrBool>::deserialize(deserializer)? {
        Some(StringOrBool::String(s)) => Some(s),
        Some(StringOrBool::Bool(..)) | None => None,
    })
}

impl Config {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error: unable to read {}: {}", path.display(), e))?;

        Self::from_json(&json)
            .map_err(|e| format!("Error: invalid configuration in {}: {}", path.display(), e))
    }

    pub fn returns_string(&self) -> bool {
        self.return_string.unwrap_or(false)
    }

    pub fn options(&self) -> Options<'static> {
        let mut options = Options::default()
            .combine_selectors(self.combine_selectors.unwrap_or(true))
            .remove_comments(self.remove_comments.unwrap_or(false))
            .comments_same_line(self.comments_same_line.unwrap_or(false))
            .remove_empty_lines(self.remove_empty_lines.unwrap_or(false))
            .verbose(self.verbose.unwrap_or(false))
            .silent(self.silent.unwrap_or(false))
            .log_result(self.log_result.unwrap_or(false));

        if let Some(output_dir) = &self.output_dir {
            options = options.output_dir(output_dir);
        }

        if let Some(output_filename) = &self.output_filename {
            options = options.output_filename(output_filename.as_str());
        }

        if let Some(output_file_ext) = &self.output_file_ext {
            options = options.output_file_ext(output_file_ext.as_str());
        }

        options
    }

    pub fn parent(&self) -> Input {
        let input = Input::path(self.parent_file.as_deref().unwrap_or(DEFAULT_PARENT));

        match &self.parent_css {
            Some(css) => input.with_text(css.as_str()),
            None => input,
        }
    }

    /// The child stylesheets to diff, one per match when the child path is a
    /// wildcard pattern
    pub fn children(&self) -> Result<Vec<Input>, String> {
        let path = self.child_file.as_deref().unwrap_or(DEFAULT_CHILD);

        if let Some(css) = &self.child_css {
            return Ok(vec![Input::path(path).with_text(css.as_str())]);
        }

        if !path.contains('*') {
            return Ok(vec![Input::path(path)]);
        }

        let matches = glob::glob(path)
            .map_err(|e| format!("Error: invalid pattern {}: {}", path, e))?;

        let mut children = Vec::new();
        for entry in matches {
            let child = entry.map_err(|e| format!("Error: {}", e))?;
            children.push(Input::path(child));
        }

        if children.is_empty() {
            return Err(format!("Error: no files match {}", path));
        }

        Ok(children)
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::Config;

    #[test]
    fn camel_case_keys() {
        let config = Config::from_json(
            r#"{
                "parentFile": "base.css",
                "childCSS": "a { color: red; }",
                "outputFileExt": ".diff.css",
                "combineSelectors": false,
                "returnString": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.parent_file.as_deref(), Some("base.css"));
        assert_eq!(config.child_css.as_deref(), Some("a { color: red; }"));
        assert_eq!(config.output_file_ext.as_deref(), Some(".diff.css"));
        assert_eq!(config.combine_selectors, Some(false));
        assert!(config.returns_string());
    }

    #[test]
    fn false_means_unset() {
        let config =
            Config::from_json(r#"{ "parentCSS": false, "outputFilename": false }"#).unwrap();

        assert_eq!(config.parent_css, None);
        assert_eq!(config.output_filename, None);
    }

    #[test]
    fn defaults_name_parent_and_child() {
        let config = Config::default();

        assert_eq!(config.parent().file_path(), Path::new("./parent.css"));
        assert_eq!(
            config.children().unwrap()[0].file_path(),
            Path::new("./child.css")
        );
        assert!(!config.returns_string());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::from_json(r#"{ "verbose": "yes" }"#).is_err());
    }

    #[test]
    fn wildcard_children_are_expanded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.css"), "a { color: red; }").unwrap();
        std::fs::write(dir.path().join("two.css"), "b { color: red; }").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let config = Config {
            child_file: Some(format!("{}/*.css", dir.path().display())),
            ..Config::default()
        };

        let children = config.children().unwrap();
        let names: Vec<String> = children
            .iter()
            .map(|child| child.file_path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["one.css", "two.css"]);
    }

    #[test]
    fn wildcard_without_matches_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            child_file: Some(format!("{}/*.css", dir.path().display())),
            ..Config::default()
        };

        assert!(config.children().is_err());
    }
}
