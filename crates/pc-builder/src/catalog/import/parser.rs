use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::components::{
    Case, Component, ComponentKind, Cpu, FormFactor, Gpu, MemoryType, Motherboard, NegativePrice,
    Price, Psu, Ram, Socket, UnknownVariant,
};

use super::super::store::{CatalogEntry, ComponentId};

/// Reason a single export row was refused at the catalog boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowRejection {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
    #[error("missing value for column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' is not a valid number: '{value}'")]
    InvalidNumber { column: &'static str, value: String },
    #[error(transparent)]
    NegativePrice(#[from] NegativePrice),
    #[error("power supply wattage must be positive")]
    ZeroWattage,
}

/// One line of the flat catalog export. Columns a category does not use stay blank.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogRow {
    kind: String,
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    manufacturer: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    socket: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    memory_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    form_factor: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tdp: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    length: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    benchmark_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    wattage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_gpu_length: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    avg_used_price: Option<String>,
}

impl CatalogRow {
    pub(crate) fn into_entry(self) -> Result<CatalogEntry, RowRejection> {
        let kind = ComponentKind::from_str(&self.kind)?;
        let id = ComponentId(parse_number("id", Some(self.id.as_str()))?);
        let avg_used_price = self.price()?;

        let component = match kind {
            ComponentKind::Cpu => Component::Cpu(Cpu {
                socket: parse_enum::<Socket>("socket", self.socket.as_deref())?,
                tdp: parse_number("tdp", self.tdp.as_deref())?,
                benchmark_score: parse_number("benchmark_score", self.benchmark_score.as_deref())?,
                avg_used_price,
            }),
            ComponentKind::Gpu => Component::Gpu(Gpu {
                length_mm: parse_number("length", self.length.as_deref())?,
                tdp: parse_number("tdp", self.tdp.as_deref())?,
                benchmark_score: parse_number("benchmark_score", self.benchmark_score.as_deref())?,
                avg_used_price,
            }),
            ComponentKind::Motherboard => Component::Motherboard(Motherboard {
                socket: parse_enum::<Socket>("socket", self.socket.as_deref())?,
                memory_type: parse_enum::<MemoryType>("memory_type", self.memory_type.as_deref())?,
                form_factor: parse_enum::<FormFactor>("form_factor", self.form_factor.as_deref())?,
                avg_used_price,
            }),
            ComponentKind::Ram => Component::Ram(Ram {
                memory_type: parse_enum::<MemoryType>("memory_type", self.memory_type.as_deref())?,
                avg_used_price,
            }),
            ComponentKind::Psu => {
                let wattage: u32 = parse_number("wattage", self.wattage.as_deref())?;
                if wattage == 0 {
                    return Err(RowRejection::ZeroWattage);
                }
                Component::Psu(Psu {
                    wattage,
                    avg_used_price,
                })
            }
            ComponentKind::Case => Component::Case(Case {
                form_factor: parse_enum::<FormFactor>("form_factor", self.form_factor.as_deref())?,
                max_gpu_length_mm: parse_number("max_gpu_length", self.max_gpu_length.as_deref())?,
                avg_used_price,
            }),
        };

        Ok(CatalogEntry {
            id,
            name: self.name.trim().to_string(),
            manufacturer: self.manufacturer.unwrap_or_default().trim().to_string(),
            component,
        })
    }

    fn price(&self) -> Result<Price, RowRejection> {
        let raw = self
            .avg_used_price
            .as_deref()
            .ok_or(RowRejection::MissingColumn("avg_used_price"))?;
        let amount = Decimal::from_str(raw.trim()).map_err(|_| RowRejection::InvalidNumber {
            column: "avg_used_price",
            value: raw.to_string(),
        })?;
        Ok(Price::new(amount)?)
    }
}

fn parse_enum<T>(column: &'static str, raw: Option<&str>) -> Result<T, RowRejection>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw = raw.ok_or(RowRejection::MissingColumn(column))?;
    Ok(T::from_str(raw)?)
}

fn parse_number<T: FromStr>(column: &'static str, raw: Option<&str>) -> Result<T, RowRejection> {
    let raw = raw.ok_or(RowRejection::MissingColumn(column))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| RowRejection::InvalidNumber {
            column,
            value: raw.to_string(),
        })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
