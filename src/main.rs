extern crate youtube_metrics_collector;

use std::collections::HashMap;
use std::process;
use std::path::PathBuf;
use structopt::StructOpt;

use youtube_metrics_collector::config::{create_dir_if_missing, read_api_key, Args, Rtd};
use youtube_metrics_collector::extract::extract_video_id;
use youtube_metrics_collector::http::fetch_video_metrics;
use youtube_metrics_collector::report::{build_report, ReportRow};
use youtube_metrics_collector::table::{read_video_table, write_report, VideoRecord};

#[derive(StructOpt, Debug)]
#[structopt(name = "youtube-metrics-collector")]
/// Collect YouTube video metrics for a table of video links
struct Opt {
    /// Show extra information
    #[structopt(short = "v", long)]
    verbose: bool,

    /// Print debugging information
    #[structopt(short = "D", long)]
    debug: bool,

    /// File to read configuration from
    #[structopt(short = "c", long, parse(from_os_str))]
    conf: Option<PathBuf>,

    /// File to read the API key from
    #[structopt(short = "k", long, parse(from_os_str))]
    key_file: Option<PathBuf>,

    /// Input CSV of nicknames and video links
    #[structopt(short = "i", long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output CSV path
    #[structopt(short = "o", long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() {
    let opt = Opt::from_args();

    let args = Args {
        flag_verbose: opt.verbose,
        flag_debug: opt.debug,
        flag_conf: opt.conf,
        flag_key_file: opt.key_file,
        flag_input: opt.input,
        flag_output: opt.output,
    };

    // get a run-time configuration data structure
    let rtd: Rtd = Rtd::from_args(args).unwrap_or_else(|err| {
        eprintln!("Error loading configuration: {}", err);
        process::exit(1);
    });

    println!("Using configuration: {}", rtd.paths.conf.display());
    if rtd.args.flag_verbose {
        println!("\n[files]\n{}", rtd.conf.files);
        println!("[parameters]\n{}", rtd.conf.params);
    }

    println!("Loading API key from: {}", rtd.paths.api_key.display());
    let api_key = read_api_key(&rtd.paths.api_key).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        eprintln!("Create the file and add your YouTube Data API v3 key to it, with no extra text.");
        process::exit(1);
    });
    println!("API key loaded successfully");

    println!("\nReading input file: {}", rtd.paths.input.display());
    let videos = read_video_table(&rtd.paths.input).unwrap_or_else(|err| {
        eprintln!("Error reading input file: {}", err);
        process::exit(1);
    });
    println!("Found {} videos to process", videos.len());

    // extract video IDs, remembering which input row each one came from
    let mut videos_by_id: HashMap<String, VideoRecord> = HashMap::new();
    let mut video_ids: Vec<String> = Vec::new();
    for video in videos {
        match extract_video_id(&video.url) {
            Some(video_id) => {
                if rtd.args.flag_debug {
                    eprintln!("{} -> {}", video.url, video_id);
                }
                video_ids.push(video_id.clone());
                videos_by_id.insert(video_id, video);
            },
            None => {
                eprintln!("Warning: could not extract a video ID from URL: {}", video.url)
            },
        }
    }
    println!("Successfully extracted {} video IDs", video_ids.len());

    if video_ids.is_empty() {
        println!("No valid video IDs found, exiting");
        return;
    }

    println!("Retrieving metrics from the YouTube API...");
    let outcomes = fetch_video_metrics(&video_ids, &api_key, &rtd).unwrap_or_else(|err| {
        eprintln!("Error building the API client: {}", err);
        process::exit(1);
    });
    println!("Retrieved metrics for {} videos", outcomes.len());

    // combine original data with metrics
    let report = build_report(&videos_by_id, outcomes);

    println!("Writing output file: {}", rtd.paths.output.display());
    if let Some(parent) = rtd.paths.output.parent() {
        create_dir_if_missing(parent).unwrap_or_else(|err| {
            eprintln!("Error creating output directory: {}", err);
            process::exit(1);
        });
    }
    write_report(&rtd.paths.output, &report).unwrap_or_else(|err| {
        eprintln!("Error writing output file: {}", err);
        process::exit(1);
    });
    println!(
        "Successfully wrote {} rows to {}",
        report.len(),
        rtd.paths.output.display()
    );

    print_summary(&report);
}

fn print_summary(report: &[ReportRow]) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));

    let total_views: u64 = report.iter()
        .filter_map(|row| row.view_count.parse::<u64>().ok())
        .sum();
    println!("Total videos processed: {}", report.len());
    println!("Total views across all videos: {}", total_views);

    let errors: Vec<&ReportRow> = report.iter()
        .filter(|row| !row.error.is_empty())
        .collect();
    if !errors.is_empty() {
        println!("\nVideos with errors: {}", errors.len());
        for row in errors {
            println!("  - {}: {}", row.nickname, row.error);
        }
    }
}
