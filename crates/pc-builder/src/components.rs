//! Typed component values shared by the catalog and the build engine.
//!
//! Everything in here is already validated: enum spellings come from closed sets and
//! prices are non-negative. Malformed catalog data is rejected while it is imported, so
//! the compatibility rules and metrics never have to re-check these invariants.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raised when a catalog spelling does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// CPU / motherboard socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Socket {
    #[serde(rename = "AM4")]
    Am4,
    #[serde(rename = "AM5")]
    Am5,
    #[serde(rename = "LGA1151")]
    Lga1151,
    #[serde(rename = "LGA1200")]
    Lga1200,
    #[serde(rename = "LGA1700")]
    Lga1700,
}

impl Socket {
    pub const fn all() -> [Self; 5] {
        [
            Self::Am4,
            Self::Am5,
            Self::Lga1151,
            Self::Lga1200,
            Self::Lga1700,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am4 => "AM4",
            Self::Am5 => "AM5",
            Self::Lga1151 => "LGA1151",
            Self::Lga1200 => "LGA1200",
            Self::Lga1700 => "LGA1700",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Am4 => "AMD AM4",
            Self::Am5 => "AMD AM5",
            Self::Lga1151 => "Intel LGA1151 v2",
            Self::Lga1200 => "Intel LGA1200",
            Self::Lga1700 => "Intel LGA1700",
        }
    }
}

impl FromStr for Socket {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::all()
            .into_iter()
            .find(|socket| socket.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("socket", raw))
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Memory generation supported by a motherboard or provided by a RAM kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryType {
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl MemoryType {
    pub const fn all() -> [Self; 2] {
        [Self::Ddr4, Self::Ddr5]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ddr4 => "DDR4",
            Self::Ddr5 => "DDR5",
        }
    }
}

impl FromStr for MemoryType {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("memory type", raw))
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical size class shared by motherboards and cases (ATX > mATX > ITX).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormFactor {
    #[serde(rename = "ATX")]
    Atx,
    #[serde(rename = "mATX")]
    MicroAtx,
    #[serde(rename = "ITX")]
    MiniItx,
}

impl FormFactor {
    pub const fn all() -> [Self; 3] {
        [Self::Atx, Self::MicroAtx, Self::MiniItx]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atx => "ATX",
            Self::MicroAtx => "mATX",
            Self::MiniItx => "ITX",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Atx => "ATX",
            Self::MicroAtx => "Micro-ATX",
            Self::MiniItx => "Mini-ITX",
        }
    }

    const fn size_rank(self) -> u8 {
        match self {
            Self::MiniItx => 0,
            Self::MicroAtx => 1,
            Self::Atx => 2,
        }
    }

    /// Whether a board of this size mounts in a case of the given size class.
    ///
    /// Cases accept boards of their own size or smaller, so this is a partial order
    /// rather than equality: an ATX case takes every board, an ITX case only ITX.
    pub const fn fits_in(self, case: FormFactor) -> bool {
        self.size_rank() <= case.size_rank()
    }
}

impl FromStr for FormFactor {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::all()
            .into_iter()
            .find(|factor| factor.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("form factor", raw))
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six component categories, declared in the order builds list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Psu,
    Case,
}

impl ComponentKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Cpu,
            Self::Gpu,
            Self::Motherboard,
            Self::Ram,
            Self::Psu,
            Self::Case,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Motherboard => "motherboard",
            Self::Ram => "ram",
            Self::Psu => "psu",
            Self::Case => "case",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Motherboard => "Motherboard",
            Self::Ram => "RAM",
            Self::Psu => "Power supply",
            Self::Case => "Case",
        }
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("component kind", raw))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("price must be non-negative, found {0}")]
pub struct NegativePrice(pub Decimal);

/// Average second-hand price, kept at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, NegativePrice> {
        if value < Decimal::ZERO {
            return Err(NegativePrice(value));
        }

        let mut amount = value;
        amount.rescale(2);
        Ok(Self(amount))
    }

    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = NegativePrice;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    pub socket: Socket,
    pub tdp: u32,
    pub benchmark_score: u32,
    pub avg_used_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gpu {
    pub length_mm: u32,
    pub tdp: u32,
    pub benchmark_score: u32,
    pub avg_used_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motherboard {
    pub socket: Socket,
    pub memory_type: MemoryType,
    pub form_factor: FormFactor,
    pub avg_used_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ram {
    pub memory_type: MemoryType,
    pub avg_used_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psu {
    pub wattage: u32,
    pub avg_used_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub form_factor: FormFactor,
    pub max_gpu_length_mm: u32,
    pub avg_used_price: Price,
}

/// Any one component value, tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Component {
    Cpu(Cpu),
    Gpu(Gpu),
    Motherboard(Motherboard),
    Ram(Ram),
    Psu(Psu),
    Case(Case),
}

impl Component {
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Component::Cpu(_) => ComponentKind::Cpu,
            Component::Gpu(_) => ComponentKind::Gpu,
            Component::Motherboard(_) => ComponentKind::Motherboard,
            Component::Ram(_) => ComponentKind::Ram,
            Component::Psu(_) => ComponentKind::Psu,
            Component::Case(_) => ComponentKind::Case,
        }
    }

    pub fn avg_used_price(&self) -> Price {
        match self {
            Component::Cpu(cpu) => cpu.avg_used_price,
            Component::Gpu(gpu) => gpu.avg_used_price,
            Component::Motherboard(board) => board.avg_used_price,
            Component::Ram(ram) => ram.avg_used_price,
            Component::Psu(psu) => psu.avg_used_price,
            Component::Case(case) => case.avg_used_price,
        }
    }

    pub fn benchmark_score(&self) -> Option<u32> {
        match self {
            Component::Cpu(cpu) => Some(cpu.benchmark_score),
            Component::Gpu(gpu) => Some(gpu.benchmark_score),
            _ => None,
        }
    }

    pub fn socket(&self) -> Option<Socket> {
        match self {
            Component::Cpu(cpu) => Some(cpu.socket),
            Component::Motherboard(board) => Some(board.socket),
            _ => None,
        }
    }

    pub fn memory_type(&self) -> Option<MemoryType> {
        match self {
            Component::Motherboard(board) => Some(board.memory_type),
            Component::Ram(ram) => Some(ram.memory_type),
            _ => None,
        }
    }

    pub fn form_factor(&self) -> Option<FormFactor> {
        match self {
            Component::Motherboard(board) => Some(board.form_factor),
            Component::Case(case) => Some(case.form_factor),
            _ => None,
        }
    }

    pub fn wattage(&self) -> Option<u32> {
        match self {
            Component::Psu(psu) => Some(psu.wattage),
            _ => None,
        }
    }
}
