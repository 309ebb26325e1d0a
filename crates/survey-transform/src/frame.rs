//! Column-level helpers shared by the ETL steps.

use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, PolarsError, Series,
};

use survey_model::SurveyError;

pub(crate) fn frame_err(err: PolarsError) -> SurveyError {
    SurveyError::Frame(err.to_string())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub(crate) fn set_string_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> Result<(), SurveyError> {
    let series = Series::new(name.into(), values);
    df.with_column(series).map_err(frame_err)?;
    Ok(())
}

pub(crate) fn set_i64_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<i64>>,
) -> Result<(), SurveyError> {
    let series = Series::new(name.into(), values);
    df.with_column(series).map_err(frame_err)?;
    Ok(())
}

pub(crate) fn set_f64_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<f64>>,
) -> Result<(), SurveyError> {
    let series = Series::new(name.into(), values);
    df.with_column(series).map_err(frame_err)?;
    Ok(())
}

pub(crate) fn filter_rows(df: &mut DataFrame, keep: &[bool]) -> Result<(), SurveyError> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask).map_err(frame_err)?;
    Ok(())
}

pub(crate) fn drop_column(df: &mut DataFrame, name: &str) -> Result<bool, SurveyError> {
    if !has_column(df, name) {
        return Ok(false);
    }
    df.drop_in_place(name).map_err(frame_err)?;
    Ok(true)
}

/// Whether a column already holds numbers rather than text.
pub(crate) fn is_numeric_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .map(|column| {
            matches!(
                column.dtype(),
                DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
                    | DataType::Float32
                    | DataType::Float64
            )
        })
        .unwrap_or(false)
}

/// Cell value with null kept distinct from every string.
pub(crate) fn cell_key(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(survey_ingest::any_to_string(other)),
    }
}
