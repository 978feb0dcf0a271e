use std::{
    ffi::OsString,
    io::{self, Write},
    path::Path,
    process,
};

use clap::{crate_version, App, Arg, ArgMatches};
use log::{info, warn};
use sop_gen::{splice, Error, Formatter, Markers};

const DEFAULT_TARGET: &str = "sum_of_products.zig";

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("sop-gen")
        .version(crate_version!())
        .about("Generates the unrolled sum-of-products arms of a Zig kernel")
        .arg(
            Arg::with_name("target")
                .help("File to splice the generated arms into")
                .default_value(DEFAULT_TARGET)
                .index(1),
        )
        .arg(
            Arg::with_name("stdout")
                .long("stdout")
                .help("Print the generated arms instead of touching any file"),
        )
        .arg(
            Arg::with_name("remove")
                .long("remove")
                .conflicts_with("stdout")
                .help("Leave nothing between the markers"),
        )
        .arg(
            Arg::with_name("check")
                .long("check")
                .conflicts_with("stdout")
                .help("Exit with status 1 if the target is not up to date; writes nothing"),
        )
        .arg(
            Arg::with_name("init")
                .long("init")
                .conflicts_with_all(&["stdout", "check"])
                .help("Create the target from a module skeleton first"),
        )
        .arg(
            Arg::with_name("no-fmt")
                .long("no-fmt")
                .help("Skip the formatter pass"),
        )
        .arg(
            Arg::with_name("formatter")
                .long("formatter")
                .takes_value(true)
                .value_name("CMD")
                .default_value("zig fmt")
                .help(
                    "Formatter command, split on whitespace (no quoting); the target path is appended",
                ),
        )
        .arg(
            Arg::with_name("start-marker")
                .long("start-marker")
                .takes_value(true)
                .value_name("TEXT")
                .default_value("START GEN"),
        )
        .arg(
            Arg::with_name("end-marker")
                .long("end-marker")
                .takes_value(true)
                .value_name("TEXT")
                .default_value("END GEN"),
        )
}

/// The old generator toggled removal when its first argument merely contained
/// `-remove`; map such an option-like first argument onto `--remove`. Paths
/// that happen to contain `-remove` are left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if let Some(first) = args.get_mut(1) {
        let legacy = first
            .to_str()
            .map_or(false, |s| {
                s.starts_with('-') && s.contains("-remove") && s != "--remove"
            });
        if legacy {
            *first = "--remove".into();
        }
    }
    args
}

fn run(m: &ArgMatches) -> sop_gen::Result<bool> {
    let body = sop_gen::generate_body();
    if m.is_present("stdout") {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(body.as_bytes())
            .and_then(|_| lock.flush())
            .map_err(|e| Error::Io {
                path: "<stdout>".into(),
                source: e,
            })?;
        return Ok(true);
    }

    let target = Path::new(m.value_of("target").unwrap_or(DEFAULT_TARGET));
    let markers = Markers {
        start: m.value_of("start-marker").unwrap_or("START GEN").into(),
        end: m.value_of("end-marker").unwrap_or("END GEN").into(),
    };
    let body = if m.is_present("remove") {
        None
    } else {
        Some(body.as_str())
    };

    if m.is_present("check") {
        let fresh = splice::check_file(target, &markers, body)?;
        if !fresh {
            warn!("{} is out of date", target.display());
        }
        return Ok(fresh);
    }

    if m.is_present("init") {
        splice::create_file(target, &sop_gen::generate_module(&markers))?;
    }
    let outcome = splice::splice_file(target, &markers, body)?;
    if !outcome.changed {
        info!("{} unchanged", target.display());
    }

    if !m.is_present("no-fmt") {
        let formatter = Formatter::parse(m.value_of("formatter").unwrap_or("zig fmt"))?;
        formatter.run(target)?;
    }
    Ok(true)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = app().get_matches_from(normalize_args(std::env::args_os()));
    match run(&matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("sop-gen: {}", e);
            process::exit(1);
        }
    }
}
