extern crate youtube_metrics_collector;

use std::io::{self, BufRead};
use youtube_metrics_collector::extract::extract_video_id;

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.unwrap();
        let out = match extract_video_id(&line) {
            Some(video_id) => video_id,
            None => format!("# no video ID in {}", line),
        };
        println!("{}", out);
    }
}
