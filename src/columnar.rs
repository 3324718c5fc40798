use arrow2::array::*;
use arrow2::chunk::Chunk;
use arrow2::datatypes::*;

use crate::athletes::{AthletePhysique, AthleteRanking, CountryAthlete};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::heatmap::Matrix;
use crate::record::AthleteRecord;
use crate::tally::{FetchedTally, RegionTally, YearMedals, YearTally};
use crate::trends::{ParticipationRow, TimeSeries};

// ─────────────────────────────────────────────────────────────
//  Column builders (arrow2 MutableArrays)
// ─────────────────────────────────────────────────────────────
//
// `$value` is evaluated once per row with `$r` bound to the row and
// must produce an `Option<_>`; `None` becomes a null slot.

macro_rules! utf8_col {
    ($rows:expr, |$r:ident| $value:expr) => {{
        let mut col = MutableUtf8Array::<i32>::with_capacity($rows.len());
        for $r in $rows.iter() {
            col.push($value);
        }
        col.as_box()
    }};
}

macro_rules! prim_col {
    ($ty:ty, $rows:expr, |$r:ident| $value:expr) => {{
        let mut col = MutablePrimitiveArray::<$ty>::with_capacity($rows.len());
        for $r in $rows.iter() {
            col.push($value);
        }
        col.as_box()
    }};
}

/// A result table laid out as one Arrow chunk plus its schema.
#[derive(Debug, Clone)]
pub struct Columnar {
    pub schema: Schema,
    pub chunk: Chunk<Box<dyn Array>>,
}

impl Columnar {
    fn try_new(fields: Vec<Field>, arrays: Vec<Box<dyn Array>>) -> Result<Self> {
        Ok(Self {
            schema: Schema::from(fields),
            chunk: Chunk::try_new(arrays)?,
        })
    }

    pub fn from_rows<T: ToColumns>(rows: &[T]) -> Result<Self> {
        Self::try_new(T::fields(), T::columns(rows))
    }

    /// The dataset itself, with one 0/1 indicator column per medal.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        Self::from_rows(dataset.records())
    }

    pub fn from_tally(tally: &FetchedTally) -> Result<Self> {
        match tally {
            FetchedTally::ByRegion(rows) => Self::from_rows(rows),
            FetchedTally::ByYear(rows) => Self::from_rows(rows),
        }
    }

    /// Two columns: `Editions` and one named after the counted column.
    pub fn from_time_series(series: &TimeSeries) -> Result<Self> {
        let points = &series.points;
        Self::try_new(
            vec![
                Field::new("Editions", DataType::Int32, false),
                Field::new(series.column.label(), DataType::UInt64, false),
            ],
            vec![
                prim_col!(i32, points, |p| Some(p.edition)),
                prim_col!(u64, points, |p| Some(p.count as u64)),
            ],
        )
    }

    /// `Sport` followed by one count column per edition.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self> {
        let mut fields = vec![Field::new("Sport", DataType::Utf8, false)];
        let mut arrays = vec![utf8_col!(matrix.rows, |s| Some(s.as_str()))];

        for (c, year) in matrix.columns.iter().enumerate() {
            fields.push(Field::new(year.to_string(), DataType::UInt32, false));
            let values: Vec<u32> = matrix.cells.iter().map(|row| row[c]).collect();
            arrays.push(Box::new(PrimitiveArray::<u32>::from_vec(values)));
        }
        Self::try_new(fields, arrays)
    }

    pub fn len(&self) -> usize {
        self.chunk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk.is_empty()
    }
}

/// Row types that know their own Arrow layout.
pub trait ToColumns: Sized {
    fn fields() -> Vec<Field>;
    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>>;
}

fn medal_fields() -> Vec<Field> {
    vec![
        Field::new("Gold", DataType::UInt32, false),
        Field::new("Silver", DataType::UInt32, false),
        Field::new("Bronze", DataType::UInt32, false),
    ]
}

impl ToColumns for AthleteRecord {
    fn fields() -> Vec<Field> {
        let mut fields = vec![
            Field::new("ID", DataType::UInt32, true),
            Field::new("Name", DataType::Utf8, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float64, true),
            Field::new("Height", DataType::Float64, true),
            Field::new("Weight", DataType::Float64, true),
            Field::new("Team", DataType::Utf8, false),
            Field::new("NOC", DataType::Utf8, false),
            Field::new("Games", DataType::Utf8, false),
            Field::new("Year", DataType::Int32, false),
            Field::new("Season", DataType::Utf8, false),
            Field::new("City", DataType::Utf8, false),
            Field::new("Sport", DataType::Utf8, false),
            Field::new("Event", DataType::Utf8, false),
            Field::new("Medal", DataType::Utf8, true),
            Field::new("region", DataType::Utf8, true),
        ];
        fields.extend(medal_fields());
        fields
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            prim_col!(u32, rows, |r| r.id),
            utf8_col!(rows, |r| Some(r.name.as_str())),
            utf8_col!(rows, |r| Some(r.sex.as_str())),
            prim_col!(f64, rows, |r| r.age),
            prim_col!(f64, rows, |r| r.height),
            prim_col!(f64, rows, |r| r.weight),
            utf8_col!(rows, |r| Some(r.team.as_str())),
            utf8_col!(rows, |r| Some(r.noc.as_str())),
            utf8_col!(rows, |r| Some(r.games.as_str())),
            prim_col!(i32, rows, |r| Some(r.year)),
            utf8_col!(rows, |r| Some(r.season.as_str())),
            utf8_col!(rows, |r| Some(r.city.as_str())),
            utf8_col!(rows, |r| Some(r.sport.as_str())),
            utf8_col!(rows, |r| Some(r.event.as_str())),
            utf8_col!(rows, |r| r.medal.map(|m| m.as_str())),
            utf8_col!(rows, |r| r.region()),
            prim_col!(u32, rows, |r| Some(r.gold())),
            prim_col!(u32, rows, |r| Some(r.silver())),
            prim_col!(u32, rows, |r| Some(r.bronze())),
        ]
    }
}

impl ToColumns for RegionTally {
    fn fields() -> Vec<Field> {
        let mut fields = vec![Field::new("region", DataType::Utf8, false)];
        fields.extend(medal_fields());
        fields.push(Field::new("Total", DataType::UInt32, false));
        fields
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            utf8_col!(rows, |r| Some(r.region.as_str())),
            prim_col!(u32, rows, |r| Some(r.medals.gold)),
            prim_col!(u32, rows, |r| Some(r.medals.silver)),
            prim_col!(u32, rows, |r| Some(r.medals.bronze)),
            prim_col!(u32, rows, |r| Some(r.medals.total)),
        ]
    }
}

impl ToColumns for YearTally {
    fn fields() -> Vec<Field> {
        let mut fields = vec![Field::new("Year", DataType::Int32, false)];
        fields.extend(medal_fields());
        fields.push(Field::new("Total", DataType::UInt32, false));
        fields
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            prim_col!(i32, rows, |r| Some(r.year)),
            prim_col!(u32, rows, |r| Some(r.medals.gold)),
            prim_col!(u32, rows, |r| Some(r.medals.silver)),
            prim_col!(u32, rows, |r| Some(r.medals.bronze)),
            prim_col!(u32, rows, |r| Some(r.medals.total)),
        ]
    }
}

impl ToColumns for YearMedals {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("Year", DataType::Int32, false),
            Field::new("Medal", DataType::UInt32, false),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            prim_col!(i32, rows, |r| Some(r.year)),
            prim_col!(u32, rows, |r| Some(r.medals)),
        ]
    }
}

impl ToColumns for AthleteRanking {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Medals", DataType::UInt32, false),
            Field::new("Sport", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, true),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            utf8_col!(rows, |r| Some(r.name.as_str())),
            prim_col!(u32, rows, |r| Some(r.medals)),
            utf8_col!(rows, |r| Some(r.sport.as_str())),
            utf8_col!(rows, |r| r.region.as_deref()),
        ]
    }
}

impl ToColumns for CountryAthlete {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Medals", DataType::UInt32, false),
            Field::new("Sport", DataType::Utf8, false),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            utf8_col!(rows, |r| Some(r.name.as_str())),
            prim_col!(u32, rows, |r| Some(r.medals)),
            utf8_col!(rows, |r| Some(r.sport.as_str())),
        ]
    }
}

impl ToColumns for AthletePhysique {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float64, true),
            Field::new("Height", DataType::Float64, true),
            Field::new("Weight", DataType::Float64, true),
            Field::new("Sport", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, true),
            Field::new("Medal", DataType::Utf8, false),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            utf8_col!(rows, |r| Some(r.name.as_str())),
            utf8_col!(rows, |r| Some(r.sex.as_str())),
            prim_col!(f64, rows, |r| r.age),
            prim_col!(f64, rows, |r| r.height),
            prim_col!(f64, rows, |r| r.weight),
            utf8_col!(rows, |r| Some(r.sport.as_str())),
            utf8_col!(rows, |r| r.region.as_deref()),
            utf8_col!(rows, |r| Some(r.medal.to_string())),
        ]
    }
}

impl ToColumns for ParticipationRow {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("Year", DataType::Int32, false),
            Field::new("Male", DataType::UInt32, false),
            Field::new("Female", DataType::UInt32, false),
        ]
    }

    fn columns(rows: &[Self]) -> Vec<Box<dyn Array>> {
        vec![
            prim_col!(i32, rows, |r| Some(r.year)),
            prim_col!(u32, rows, |r| Some(r.male)),
            prim_col!(u32, rows, |r| Some(r.female)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Medal;
    use crate::trends::{Column, EditionCount};

    #[test]
    fn dataset_chunk_carries_medal_indicators() {
        let ds = Dataset::from_records(vec![
            AthleteRecord {
                name: "a".into(),
                medal: Some(Medal::Silver),
                ..Default::default()
            },
            AthleteRecord {
                name: "b".into(),
                ..Default::default()
            },
        ]);
        let columnar = Columnar::from_dataset(&ds).unwrap();
        assert_eq!(columnar.len(), 2);
        assert_eq!(columnar.schema.fields.len(), columnar.chunk.arrays().len());

        let silver_idx = columnar
            .schema
            .fields
            .iter()
            .position(|f| f.name == "Silver")
            .unwrap();
        let silver = columnar.chunk.arrays()[silver_idx]
            .as_any()
            .downcast_ref::<PrimitiveArray<u32>>()
            .unwrap();
        assert_eq!(silver.values().as_slice(), &[1, 0]);

        let region = &columnar.chunk.arrays()[15];
        assert_eq!(region.null_count(), 2);
    }

    #[test]
    fn matrix_becomes_one_column_per_year() {
        let m = Matrix {
            rows: vec!["Judo".into(), "Sailing".into()],
            columns: vec![2000, 2004],
            cells: vec![vec![1, 0], vec![3, 2]],
        };
        let columnar = Columnar::from_matrix(&m).unwrap();
        let names: Vec<_> = columnar.schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Sport", "2000", "2004"]);
        assert_eq!(columnar.len(), 2);
    }

    #[test]
    fn time_series_is_named_after_its_column() {
        let series = TimeSeries {
            column: Column::Region,
            points: vec![EditionCount {
                edition: 1896,
                count: 12,
            }],
        };
        let columnar = Columnar::from_time_series(&series).unwrap();
        assert_eq!(columnar.schema.fields[1].name, "region");
    }
}
