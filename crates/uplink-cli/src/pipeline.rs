use anyhow::Result;
use serde_json::Value;
use std::io::{Read, Write};
use tracing::{debug, error};
use uplink_converter::UplinkConverter;

/// Counts reported after a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Convert every JSON document in `reader`, writing one envelope per
/// document to `writer`.
///
/// Documents that fail conversion are logged and skipped. A syntax error
/// ends the run since the stream cannot be resynchronized.
pub fn run<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    converter: &UplinkConverter,
    pretty: bool,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let documents = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();

    for (index, document) in documents.enumerate() {
        let input = match document {
            Ok(value) => value,
            Err(e) => {
                error!(index, error = %e, "failed to parse uplink document");
                summary.failed += 1;
                break;
            }
        };

        let output = match converter.convert_value(&input) {
            Ok(output) => output,
            Err(e) => {
                error!(index, error = %e, "failed to convert uplink");
                summary.failed += 1;
                continue;
            }
        };

        if pretty {
            serde_json::to_writer_pretty(&mut writer, &output)?;
        } else {
            serde_json::to_writer(&mut writer, &output)?;
        }
        writeln!(writer)?;
        summary.converted += 1;
        debug!(index, "wrote envelope");
    }

    writer.flush()?;
    Ok(summary)
}
