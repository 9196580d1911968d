use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use flightmap_core::{
    ingest, Decoded, Ingestion, IngestionSummary, PipelineConfig, RecordError, SourceError,
    StreamingSource,
};
use flightmap_parser::{
    Carrier, CarrierDecoder, Connection, ConnectionDecoder, DecodeError, StationDecoder,
};
use tempfile::NamedTempFile;
use tokio::sync::mpsc::error::TryRecvError;

fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

async fn collect<R>(
    ingestion: Ingestion<R>,
) -> (Vec<Decoded<R>>, Vec<RecordError>, IngestionSummary) {
    let Ingestion {
        mut records,
        mut errors,
        done,
        ..
    } = ingestion;

    let error_drain = tokio::spawn(async move {
        let mut collected = Vec::new();
        while let Some(err) = errors.recv().await {
            collected.push(err);
        }
        collected
    });

    let mut decoded = Vec::new();
    while let Some(record) = records.recv().await {
        decoded.push(record);
    }
    let errors = error_drain.await.expect("error drain task");
    let summary = done.await.expect("completion signal");
    (decoded, errors, summary)
}

#[tokio::test]
async fn decodes_carrier_fixture() -> Result<()> {
    let ingestion = ingest(fixture("airlines.csv"), CarrierDecoder, &PipelineConfig::default())?;
    let (decoded, errors, summary) = collect(ingestion).await;

    assert!(errors.is_empty());
    assert_eq!(decoded.len(), 5);
    assert_eq!(
        summary,
        IngestionSummary {
            lines: 5,
            decoded: 5,
            failed: 0
        }
    );

    let american = decoded
        .iter()
        .find(|row| row.line == 2)
        .expect("line 2 should be decoded");
    assert_eq!(
        american.record,
        Carrier {
            name: Some("American Airlines".into()),
            two_digit_code: Some("AA".into()),
            three_digit_code: Some("AAL".into()),
            country: Some("United States".into()),
        }
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_line_yields_exactly_one_outcome() -> Result<()> {
    let ingestion = ingest(
        fixture("routes_malformed.csv"),
        ConnectionDecoder,
        &PipelineConfig::default(),
    )?;
    let (decoded, errors, summary) = collect(ingestion).await;

    assert_eq!(decoded.len() + errors.len(), 5);
    assert_eq!(summary.lines, 5);
    assert_eq!(summary.decoded, 3);
    assert_eq!(summary.failed, 2);

    let decoded_lines: BTreeSet<u64> = decoded.iter().map(|row| row.line).collect();
    let error_lines: BTreeSet<u64> = errors.iter().filter_map(RecordError::line).collect();
    assert_eq!(decoded_lines, BTreeSet::from([2, 5, 6]));
    assert_eq!(error_lines, BTreeSet::from([3, 4]));
    Ok(())
}

#[tokio::test]
async fn mismatched_row_is_reported_not_decoded() -> Result<()> {
    let file = write_temp(b"name,city\nHeathrow,London,extra\n");

    let ingestion = ingest(file.path(), StationDecoder, &PipelineConfig::default())?;
    let (decoded, errors, _) = collect(ingestion).await;

    assert!(decoded.is_empty());
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        RecordError::Decode {
            line,
            record,
            source,
        } => {
            assert_eq!(*line, 2);
            assert_eq!(record, &["Heathrow", "London", "extra"]);
            assert_eq!(
                source,
                &DecodeError::FieldCountMismatch {
                    header: 2,
                    record: 3
                }
            );
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn completion_fires_after_channels_close() -> Result<()> {
    let config = PipelineConfig {
        channel_capacity: 64,
        max_concurrent_decodes: None,
    };
    let Ingestion {
        mut records,
        mut errors,
        done,
        ..
    } = ingest(fixture("routes_malformed.csv"), ConnectionDecoder, &config)?;

    let summary = done.await?;
    assert_eq!(summary.lines, 5);

    let mut decoded = 0;
    loop {
        match records.try_recv() {
            Ok(_) => decoded += 1,
            Err(err) => {
                assert_eq!(err, TryRecvError::Disconnected);
                break;
            }
        }
    }
    let mut failed = 0;
    loop {
        match errors.try_recv() {
            Ok(_) => failed += 1,
            Err(err) => {
                assert_eq!(err, TryRecvError::Disconnected);
                break;
            }
        }
    }

    assert_eq!(decoded, 3);
    assert_eq!(failed, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn repeated_runs_decode_the_same_set() -> Result<()> {
    let unbounded = PipelineConfig::default();
    let bounded = PipelineConfig {
        channel_capacity: 2,
        max_concurrent_decodes: Some(2),
    };

    let mut runs: Vec<BTreeSet<(u64, Option<String>, Option<String>)>> = Vec::new();
    for config in [&unbounded, &bounded, &unbounded] {
        let (decoded, errors, _) =
            collect(ingest(fixture("routes.csv"), ConnectionDecoder, config)?).await;
        assert!(errors.is_empty());
        runs.push(
            decoded
                .into_iter()
                .map(|Decoded { line, record }| {
                    let Connection {
                        origin,
                        destination,
                        ..
                    } = record;
                    (line, origin, destination)
                })
                .collect(),
        );
    }

    assert_eq!(runs[0].len(), 9);
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0], runs[2]);
    Ok(())
}

#[tokio::test]
async fn unreadable_line_does_not_stop_the_file() -> Result<()> {
    let file =
        write_temp(b"Airline Id,Origin,Destination\nAA,JFK,LAX\nBA,\xFF\xFE,JFK\nQF,SYD,LAX\n");

    let ingestion = ingest(file.path(), ConnectionDecoder, &PipelineConfig::default())?;
    let (decoded, errors, summary) = collect(ingestion).await;

    assert_eq!(decoded.len(), 2);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        RecordError::Read(SourceError::Read { line: 3, .. })
    ));
    assert_eq!(summary.lines, 3);
    Ok(())
}

#[tokio::test]
async fn header_only_file_completes_empty() -> Result<()> {
    let file = write_temp(b"Name,City,IATA 3\n");

    let ingestion = ingest(file.path(), StationDecoder, &PipelineConfig::default())?;
    assert_eq!(ingestion.header.iter().collect::<Vec<_>>(), ["name", "city", "iata 3"]);

    let (decoded, errors, summary) = collect(ingestion).await;
    assert!(decoded.is_empty());
    assert!(errors.is_empty());
    assert_eq!(summary, IngestionSummary::default());
    Ok(())
}

#[tokio::test]
async fn missing_file_fails_before_starting() {
    let err = ingest(
        fixture("does_not_exist.csv"),
        CarrierDecoder,
        &PipelineConfig::default(),
    )
    .expect_err("missing file must fail");

    assert!(matches!(err, SourceError::Open { .. }));
}

#[tokio::test]
async fn empty_file_has_no_header() {
    let file = write_temp(b"");

    let err = ingest(file.path(), CarrierDecoder, &PipelineConfig::default())
        .expect_err("empty file must fail");

    assert!(matches!(err, SourceError::EmptyHeader { .. }));
}

#[tokio::test]
async fn unreadable_header_fails_before_starting() {
    let file = write_temp(b"Na\xFFme,City\nHeathrow,London\n");

    let err = ingest(file.path(), StationDecoder, &PipelineConfig::default())
        .expect_err("invalid UTF-8 header must fail");

    assert!(matches!(err, SourceError::Header { .. }));
    assert!(err.to_string().starts_with("failed to read CSV header"));
}

#[test]
fn source_reads_header_then_records() -> Result<()> {
    let mut source = StreamingSource::open(fixture("routes.csv"))?;

    assert_eq!(
        source.header().iter().collect::<Vec<_>>(),
        ["airline id", "origin", "destination"]
    );

    let first = source.next_record().expect("first record")?;
    assert_eq!(first.get(1), Some(" JFK"));

    let remaining = source.by_ref().count();
    assert_eq!(remaining, 8);
    assert!(source.next_record().is_none());
    Ok(())
}
