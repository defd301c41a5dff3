use std::{
    error::Error,
    io::{stdout, Write},
    path::Path,
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use cssdelta::{from_inputs, write_output};

use crate::config::{Config, DEFAULT_CONFIG};

mod config;

fn cli() -> Command {
    Command::new("cssdelta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Remove from a child stylesheet every declaration its parent stylesheet already makes")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .action(ArgAction::Version)
                .long("version")
                .short('v')
                .global(true)
        )
        .arg(
            Arg::new("CONFIG")
                .short('c')
                .long("config")
                .help("A JSON configuration file. Defaults to ./cssdelta.json when it exists")
                .value_parser(value_parser!(String))
                .num_args(1)
        )
        .arg(
            Arg::new("PARENT_FILE")
                .long("parent")
                .help("The parent stylesheet")
                .value_parser(value_parser!(String))
                .conflicts_with("PARENT")
                .num_args(1)
        )
        .arg(
            Arg::new("CHILD_FILE")
                .long("child")
                .help("The child stylesheet. May contain `*` to diff every matching file")
                .value_parser(value_parser!(String))
                .conflicts_with("CHILD")
                .num_args(1)
        )
        .arg(
            Arg::new("OUTPUT_DIR")
                .short('o')
                .long("output-dir")
                .help("Directory to write the result to")
                .value_parser(value_parser!(String))
                .num_args(1)
        )
        .arg(
            Arg::new("OUTPUT_FILENAME")
                .long("output-filename")
                .help("Name of the written file. Defaults to the child's file name")
                .value_parser(value_parser!(String))
                .num_args(1)
        )
        .arg(
            Arg::new("OUTPUT_EXT")
                .long("output-ext")
                .help("Replaces `.css` in the child's file name when naming the written file")
                .value_parser(value_parser!(String))
                .num_args(1)
        )
        .arg(
            Arg::new("NO_COMBINE_SELECTORS")
                .action(ArgAction::SetTrue)
                .long("no-combine-selectors")
                .help("Don't merge rules that have identical declarations")
        )
        .arg(
            Arg::new("REMOVE_COMMENTS")
                .action(ArgAction::SetTrue)
                .long("remove-comments")
                .help("Drop every comment")
        )
        .arg(
            Arg::new("COMMENTS_SAME_LINE")
                .action(ArgAction::SetTrue)
                .long("comments-same-line")
                .help("Keep comments on the line of the declaration before them")
        )
        .arg(
            Arg::new("REMOVE_EMPTY_LINES")
                .action(ArgAction::SetTrue)
                .long("remove-empty-lines")
                .help("Don't separate blocks with blank lines")
        )
        .arg(
            Arg::new("VERBOSE")
                .action(ArgAction::SetTrue)
                .long("verbose")
                .help("Report every step")
        )
        .arg(
            Arg::new("SILENT")
                .action(ArgAction::SetTrue)
                .short('q')
                .long("silent")
                .help("Don't report the summary or the output location")
        )
        .arg(
            Arg::new("LOG_RESULT")
                .action(ArgAction::SetTrue)
                .long("log-result")
                .help("Also report the resulting stylesheet")
        )
        .arg(
            Arg::new("STDOUT")
                .action(ArgAction::SetTrue)
                .long("stdout")
                .help("Print the result instead of writing a file")
        )
        .arg(
            Arg::new("PARENT")
                .value_parser(value_parser!(String))
                .help("The parent stylesheet"),
        )
        .arg(
            Arg::new("CHILD")
                .value_parser(value_parser!(String))
                .help("The child stylesheet"),
        )
}

/// Loads the configuration file, if any, and applies the command line on top
fn config_from_matches(matches: &ArgMatches) -> Result<Config, String> {
    let mut config = match matches.get_one::<String>("CONFIG") {
        Some(path) => Config::from_path(Path::new(path))?,
        None if Path::new(DEFAULT_CONFIG).is_file() => Config::from_path(Path::new(DEFAULT_CONFIG))?,
        None => Config::default(),
    };

    let parent = matches
        .get_one::<String>("PARENT")
        .or_else(|| matches.get_one::<String>("PARENT_FILE"));
    if let Some(parent) = parent {
        config.parent_file = Some(parent.clone());
        config.parent_css = None;
    }

    let child = matches
        .get_one::<String>("CHILD")
        .or_else(|| matches.get_one::<String>("CHILD_FILE"));
    if let Some(child) = child {
        config.child_file = Some(child.clone());
        config.child_css = None;
    }

    if let Some(output_dir) = matches.get_one::<String>("OUTPUT_DIR") {
        config.output_dir = Some(output_dir.clone());
    }

    if let Some(output_filename) = matches.get_one::<String>("OUTPUT_FILENAME") {
        config.output_filename = Some(output_filename.clone());
    }

    if let Some(output_ext) = matches.get_one::<String>("OUTPUT_EXT") {
        config.output_file_ext = Some(output_ext.clone());
    }

    let flags = [
        ("NO_COMBINE_SELECTORS", &mut config.combine_selectors, false),
        ("REMOVE_COMMENTS", &mut config.remove_comments, true),
        ("COMMENTS_SAME_LINE", &mut config.comments_same_line, true),
        ("REMOVE_EMPTY_LINES", &mut config.remove_empty_lines, true),
        ("VERBOSE", &mut config.verbose, true),
        ("SILENT", &mut config.silent, true),
        ("LOG_RESULT", &mut config.log_result, true),
        ("STDOUT", &mut config.return_string, true),
    ];

    for (id, setting, value) in flags {
        if matches.get_flag(id) {
            *setting = Some(value);
        }
    }

    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = config_from_matches(matches)?;
    let options = config.options();
    let parent = config.parent();

    for child in config.children()? {
        if config.returns_string() {
            let css = from_inputs(&parent, &child, &options)?;
            stdout().write_all(css.as_bytes())?;
        } else {
            write_output(&parent, &child, &options)?;
        }
    }

    Ok(())
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("{}", e);
        std::process::exit(1)
    }
}
