//! CLI entrypoint for the Pinlens photo search.
#![forbid(unsafe_code)]

use clap::Parser;
use geo::Coord;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process,
    time::Duration,
};
use thiserror::Error;

use pinlens_core::{ImageFetcher, PhotoReference, PhotoSearcher, Pin, PinError, SearchError};
use pinlens_flickr::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, FlickrPhotoSearcher, FlickrPhotoSearcherConfig,
    SearcherBuildError,
};

fn main() {
    let args = Arguments::parse();
    if let Err(error) = run(args) {
        eprintln!("pinlens: {error}");
        process::exit(1);
    }
}

fn run(arguments: Arguments) -> Result<(), CliError> {
    let mut config = FlickrPhotoSearcherConfig::new(arguments.api_key.clone())
        .with_endpoint(arguments.endpoint.clone())
        .with_timeout(Duration::from_secs(arguments.timeout_secs))
        .with_user_agent(arguments.user_agent.clone());
    if let Some(seed) = arguments.seed {
        config = config.with_seed(seed);
    }
    let searcher = FlickrPhotoSearcher::with_config(config)?;
    execute(arguments, searcher)
}

fn execute<S>(arguments: Arguments, searcher: S) -> Result<(), CliError>
where
    S: PhotoSearcher + ImageFetcher,
{
    let Arguments {
        lat,
        lon,
        save_dir,
        quiet,
        ..
    } = arguments;

    // Validate the centre before any network call; an off-map coordinate
    // would otherwise be silently clamped to a degenerate search region.
    let pin = Pin::new(0, Coord { x: lon, y: lat })?;
    let references = searcher.fetch_photo_references(pin.location)?;

    if !quiet {
        for reference in &references {
            println!("{reference}");
        }
    }

    if let Some(directory) = save_dir {
        save_images(&searcher, &references, &directory)?;
    }
    Ok(())
}

fn save_images<F: ImageFetcher>(
    fetcher: &F,
    references: &[PhotoReference],
    directory: &Path,
) -> Result<(), CliError> {
    fs::create_dir_all(directory).map_err(|source| CliError::CreateSaveDirectory {
        source,
        path: directory.to_path_buf(),
    })?;
    for (index, reference) in references.iter().enumerate() {
        let bytes = fetcher.fetch_image(reference)?;
        let path = directory.join(file_name_for(reference, index));
        fs::write(&path, bytes).map_err(|source| CliError::WriteImage { source, path })?;
    }
    Ok(())
}

/// Derive a file name from the final path segment of the reference URL,
/// falling back to a numbered name when the URL ends in a separator.
fn file_name_for(reference: &PhotoReference, index: usize) -> String {
    reference
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map_or_else(|| format!("photo-{index}.jpg"), ToOwned::to_owned)
}

#[derive(Debug, Parser)]
#[command(name = "pinlens", about = "Random photo sampler for a map coordinate")]
struct Arguments {
    /// Latitude of the search centre in degrees
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    lat: f64,
    /// Longitude of the search centre in degrees
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    lon: f64,
    /// API key for the photo search service
    #[arg(short = 'k', long, value_name = "key")]
    api_key: String,
    /// Override the search endpoint (for testing)
    #[arg(long, value_name = "url", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Custom HTTP user agent string
    #[arg(long, value_name = "agent", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Per-request timeout in seconds
    #[arg(long, value_name = "secs", default_value_t = 30)]
    timeout_secs: u64,
    /// Seed the page and window draws for a reproducible search
    #[arg(long, value_name = "seed")]
    seed: Option<u64>,
    /// Download each photo in the window into this directory
    #[arg(short = 's', long, value_name = "path")]
    save_dir: Option<PathBuf>,
    /// Suppress the URL listing
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Centre(#[from] PinError),
    #[error(transparent)]
    Build(#[from] SearcherBuildError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to create save directory {path:?}: {source}")]
    CreateSaveDirectory {
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to write image to {path:?}: {source}")]
    WriteImage {
        source: io::Error,
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinlens_flickr::test_support::StubPhotoSearcher;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn tmp() -> TempDir {
        TempDir::new().expect("failed to create temporary directory")
    }

    fn window_of(count: usize) -> Vec<PhotoReference> {
        (0..count)
            .map(|i| PhotoReference::new(format!("https://live.example.com/{i}_m.jpg")))
            .collect()
    }

    fn arguments(lat: f64, lon: f64) -> Arguments {
        Arguments {
            lat,
            lon,
            api_key: "test-key".to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: 30,
            seed: None,
            save_dir: None,
            quiet: true,
        }
    }

    #[rstest]
    fn parses_minimum_arguments() {
        let args = Arguments::try_parse_from([
            "pinlens", "--lat", "37.0902", "--lon", "-95.7129", "--api-key", "key",
        ])
        .expect("arguments should parse");
        assert_eq!(args.lat, 37.0902);
        assert_eq!(args.lon, -95.7129);
        assert_eq!(args.api_key, "key");
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(args.timeout_secs, 30);
        assert_eq!(args.seed, None);
        assert_eq!(args.save_dir, None);
        assert!(!args.quiet);
    }

    #[rstest]
    fn parses_overrides(tmp: TempDir) {
        let dir = tmp.path().join("photos");
        let args = Arguments::try_parse_from([
            "pinlens",
            "--lat",
            "51.5",
            "--lon",
            "-0.1",
            "--api-key",
            "key",
            "--endpoint",
            "https://flickr.test/rest",
            "--user-agent",
            "agent/1.0",
            "--timeout-secs",
            "5",
            "--seed",
            "9",
            "--save-dir",
            dir.to_str().unwrap(),
            "--quiet",
        ])
        .expect("arguments should parse");
        assert_eq!(args.endpoint, "https://flickr.test/rest");
        assert_eq!(args.user_agent, "agent/1.0");
        assert_eq!(args.timeout_secs, 5);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.save_dir.as_deref(), Some(dir.as_path()));
        assert!(args.quiet);
    }

    #[rstest]
    fn rejects_missing_api_key() {
        let outcome = Arguments::try_parse_from(["pinlens", "--lat", "0", "--lon", "0"]);
        assert!(outcome.is_err(), "parser should require --api-key");
    }

    #[rstest]
    fn run_rejects_an_invalid_endpoint() {
        let mut args = arguments(0.0, 0.0);
        args.endpoint = "not a url".to_owned();

        let outcome = run(args);

        assert!(matches!(
            outcome,
            Err(CliError::Build(SearcherBuildError::Endpoint(_)))
        ));
    }

    #[rstest]
    fn execute_rejects_an_off_map_centre() {
        let searcher = StubPhotoSearcher::with_references(window_of(1));
        let outcome = execute(arguments(95.0, 0.0), searcher);
        assert!(matches!(
            outcome,
            Err(CliError::Centre(PinError::LatitudeOutOfRange { .. }))
        ));
    }

    #[rstest]
    fn execute_propagates_search_failures() {
        let searcher = StubPhotoSearcher::with_error(SearchError::NoResults);
        let outcome = execute(arguments(37.0902, -95.7129), searcher);
        assert!(matches!(
            outcome,
            Err(CliError::Search(SearchError::NoResults))
        ));
    }

    #[rstest]
    fn execute_succeeds_without_a_save_dir() {
        let searcher = StubPhotoSearcher::with_references(window_of(3));
        execute(arguments(37.0902, -95.7129), searcher).expect("execute should succeed");
    }

    #[rstest]
    fn execute_saves_each_windowed_image(tmp: TempDir) {
        let dir = tmp.path().join("photos");
        let searcher =
            StubPhotoSearcher::with_references(window_of(3)).with_image_bytes(vec![7, 7]);
        let mut args = arguments(37.0902, -95.7129);
        args.save_dir = Some(dir.clone());

        execute(args, searcher).expect("execute should succeed");

        for i in 0..3 {
            let path = dir.join(format!("{i}_m.jpg"));
            assert_eq!(
                fs::read(&path).expect("image should be written"),
                vec![7, 7]
            );
        }
    }

    #[rstest]
    fn execute_stops_saving_on_the_first_image_failure(tmp: TempDir) {
        let dir = tmp.path().join("photos");
        let error = SearchError::HttpStatus {
            url: "https://live.example.com/0_m.jpg".into(),
            status: 404,
        };
        let searcher =
            StubPhotoSearcher::with_references(window_of(3)).with_image_error(error.clone());
        let mut args = arguments(37.0902, -95.7129);
        args.save_dir = Some(dir.clone());

        let outcome = execute(args, searcher);

        assert!(matches!(outcome, Err(CliError::Search(failure)) if failure == error));
        let entries: Vec<_> = fs::read_dir(&dir)
            .expect("save directory should exist")
            .collect();
        assert!(entries.is_empty(), "no image should be written");
    }

    #[rstest]
    #[case("https://live.example.com/65535/123_m.jpg", 0, "123_m.jpg")]
    #[case("https://live.example.com/", 4, "photo-4.jpg")]
    fn file_name_for_uses_the_last_segment(
        #[case] url: &str,
        #[case] index: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(file_name_for(&PhotoReference::new(url), index), expected);
    }
}
