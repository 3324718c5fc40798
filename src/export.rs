use std::fs::File;
use std::path::Path;

use arrow2::io::parquet::write::{
    transverse, CompressionOptions, Encoding, FileWriter, RowGroupIterator, Version, WriteOptions,
};
use tracing::info;

use crate::columnar::Columnar;
use crate::error::Result;

static WRITE_OPTIONS: WriteOptions = WriteOptions {
    write_statistics: true,
    compression: CompressionOptions::Snappy,
    version: Version::V2,
    data_pagesize_limit: None,
};

/// Writes one table as a single-row-group Parquet file.
pub fn write_parquet(columnar: &Columnar, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let encodings = columnar
        .schema
        .fields
        .iter()
        .map(|f| transverse(&f.data_type, |_| Encoding::Plain))
        .collect();

    let row_groups = RowGroupIterator::try_new(
        std::iter::once(Ok(columnar.chunk.clone())),
        &columnar.schema,
        WRITE_OPTIONS,
        encodings,
    )?;

    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, columnar.schema.clone(), WRITE_OPTIONS)?;
    for group in row_groups {
        writer.write(group?)?;
    }
    writer.end(None)?;

    info!(path = %path.display(), rows = columnar.len(), "wrote parquet");
    Ok(())
}
