//! Command-line options.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use mp_core::{AlbumName, AssetKindFilter, AssetUri};

pub const USAGE: &str = "\
Usage: media-picker [OPTIONS] <MANIFEST>

Options:
  --config <PATH>    picker.toml to load (default: <config dir>/media-picker/picker.toml)
  --album <NAME>     only show assets from this album
  --kind <KIND>      photo, video or all
  --pages <N>        extra pages to load after the first one (default: 0, -1 for all)
  --select <URI>     tap this asset after loading; repeatable
";

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub manifest: PathBuf,
    pub config: Option<PathBuf>,
    pub album: Option<AlbumName>,
    pub kind: Option<AssetKindFilter>,
    /// `None` loads until the source is exhausted.
    pub extra_pages: Option<usize>,
    pub taps: Vec<AssetUri>,
}

fn parse_kind(value: &str) -> anyhow::Result<AssetKindFilter> {
    match value {
        "photo" => Ok(AssetKindFilter::Photo),
        "video" => Ok(AssetKindFilter::Video),
        "all" => Ok(AssetKindFilter::All),
        other => Err(anyhow!("unknown asset kind: {other} (expected photo, video or all)")),
    }
}

fn parse_pages(value: &str) -> anyhow::Result<Option<usize>> {
    if value == "-1" {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .map(Some)
        .with_context(|| format!("invalid page count: {value}"))
}

impl RunOptions {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> anyhow::Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> anyhow::Result<Self> {
        if args.contains(["-h", "--help"]) {
            return Err(anyhow!("{USAGE}"));
        }

        let config = args.opt_value_from_str("--config")?;
        let album = args
            .opt_value_from_str::<_, String>("--album")?
            .map(AlbumName::from);
        let kind = args.opt_value_from_fn("--kind", parse_kind)?;
        let extra_pages = args
            .opt_value_from_fn("--pages", parse_pages)?
            .unwrap_or(Some(0));
        let taps = args
            .values_from_str::<_, String>("--select")?
            .into_iter()
            .map(AssetUri::from)
            .collect();

        let manifest = args
            .finish()
            .into_iter()
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("missing <MANIFEST>\n\n{USAGE}"))?;

        Ok(Self {
            manifest,
            config,
            album,
            kind,
            extra_pages,
            taps,
        })
    }
}
