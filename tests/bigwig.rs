//! bigWig loading, against files written with bigtools.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bigtools::beddata::BedParserStreamingIterator;
use bigtools::BigWigWrite;
use tokio::runtime;
use trackdepth::prelude::*;

const BEDGRAPH: &str = "\
chr1\t10\t20\t2.5
chr1\t30\t35\t1
chr2\t0\t5\t4
";

fn write_bigwig(dir: &Path) -> PathBuf {
    let path = dir.join("signal.bw");
    let mut chrom_map: HashMap<String, u32> = HashMap::new();
    chrom_map.insert("chr1".to_string(), 100);
    chrom_map.insert("chr2".to_string(), 50);

    let writer = BigWigWrite::create_file(path.to_string_lossy().to_string(), chrom_map)
        .expect("could not create bigWig");
    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .unwrap();
    let values = BedParserStreamingIterator::from_bedgraph_file(BEDGRAPH.as_bytes(), false);
    writer.write(values, runtime).expect("could not write bigWig");
    path
}

fn region(s: &str) -> GenomicRegion {
    s.parse().unwrap()
}

#[test]
fn test_fetch_raw_has_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let bigwig = BigWigFile::open(write_bigwig(dir.path())).unwrap();

    let fetched = bigwig.fetch_raw(&region("chr1:8-22")).unwrap();
    assert_eq!(fetched.overhang, 0);
    let values = fetched.values;
    assert_eq!(values.len(), 14);
    assert!(values[0].is_nan());
    assert_eq!(values[2], 2.5);
    assert_eq!(values[11], 2.5);
    assert!(values[12].is_nan());

    let sanitized = bigwig
        .fetch(&region("chr1:8-22"), &Sanitizer::default())
        .unwrap();
    assert_eq!(sanitized[0], 0.0);
    assert_eq!(sanitized[2], 2.5);
    assert_eq!(sanitized[13], 0.0);
}

#[test]
fn test_load_sanitizes_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), None, "").unwrap();

    let signal = track
        .load(&region("chr1:8-22"), &LoadOptions::new())
        .unwrap();
    let mut expected = vec![0.0; 14];
    for x in expected.iter_mut().take(12).skip(2) {
        *x = 2.5;
    }
    assert_eq!(signal.get("signal.bw").unwrap(), expected.as_slice());
    assert_eq!(signal.max(), Some(2.5));
    assert_eq!(signal.min(), Some(0.0));
}

#[test]
fn test_load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), Some("bw"), "").unwrap();
    let first = track.load(&region("chr1:0-100"), &LoadOptions::new()).unwrap();
    let second = track.load(&region("chr1:0-100"), &LoadOptions::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.get("bw").unwrap().iter().sum::<f32>(), 30.0);
}

#[test]
fn test_region_past_sequence_end() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), Some("bw"), "").unwrap();

    let signal = track
        .load(&region("chr2:3-60"), &LoadOptions::new())
        .unwrap();
    let values = signal.get("bw").unwrap();
    assert_eq!(values.len(), 57);
    assert_eq!(&values[..2], &[4.0, 4.0]);
    assert!(values[2..].iter().all(|x| *x == 0.0));
    assert_eq!(
        signal.report().issues(),
        vec!["10 bases of chr2:3-60 are past the end of chr2 and were set to zero"]
    );

    let signal = track
        .load(&region("chr2:70-80"), &LoadOptions::new())
        .unwrap();
    assert_eq!(signal.get("bw").unwrap(), &[0.0; 10]);
    assert_eq!(
        BigWigFile::open(track.path())
            .unwrap()
            .fetch_raw(&region("chr2:70-80"))
            .unwrap()
            .overhang,
        10
    );
}

#[test]
fn test_missing_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), None, "").unwrap();
    let result = track.load(&region("chr3:0-10"), &LoadOptions::new());
    assert!(matches!(
        result,
        Err(CoverageError::RegionOutOfBounds { seqname, .. }) if seqname == "chr3"
    ));
}

#[test]
fn test_log_transform() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), Some("bw"), "").unwrap();
    let options = LoadOptions::new().with_log_transform(LogTransform::Log2);
    let signal = track.load(&region("chr1:30-32"), &options).unwrap();
    assert_eq!(signal.get("bw").unwrap(), &[1.0, 1.0]);
}

#[test]
fn test_cached_track() {
    let dir = tempfile::tempdir().unwrap();
    let track = BigWigTrack::create(write_bigwig(dir.path()), Some("bw"), "").unwrap();
    let cached = CachedTrack::new(track);
    let options = LoadOptions::new();

    let first = cached.load(&region("chr1:10-12"), &options).unwrap().clone();
    assert!(cached.is_loaded(&region("chr1:10-12"), &options));
    assert_eq!(first.get("bw").unwrap(), &[2.5, 2.5]);
}
