//! Growable, null-terminated message buffer used to render FMI calls into diagnostic text.

use std::{
    ffi::{CStr, CString},
    fmt::{self, Display, Write as _},
    os::raw::{c_char, c_int},
};

use crate::Error;

/// A growable text buffer that is always null-terminated.
///
/// Appends are rendered at the current capacity first. When the rendered text does not fit, the
/// capacity is doubled until it does and the render is repeated, so the committed content is the
/// same as if the buffer had been large enough from the start.
#[derive(Debug)]
pub struct MessageBuffer {
    data: Vec<u8>,
    position: usize,
}

impl MessageBuffer {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Result<Self, Error> {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let capacity = capacity.max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, 0);
        Ok(Self { data, position: 0 })
    }

    /// Number of bytes the buffer can hold, including the terminating null byte.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Length of the logical content, excluding the terminating null byte.
    pub fn len(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Reset the write cursor. The allocation is kept.
    pub fn clear(&mut self) {
        self.position = 0;
        self.data[0] = 0;
    }

    pub fn as_str(&self) -> &str {
        // Only complete `fmt::Write` renders are ever committed.
        std::str::from_utf8(&self.data[..self.position]).unwrap_or_default()
    }

    /// The content including its terminating null byte.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data[..=self.position]
    }

    /// Append formatted text, e.g. `buffer.append_fmt(format_args!("nvr={}", nvr))`.
    ///
    /// On allocation failure the content is left as it was before the call.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        loop {
            let mut writer = Truncating {
                buffer: &mut self.data[self.position..],
                required: 0,
            };
            // `Truncating` never fails, and neither do the `Display` impls rendered here.
            let _ = writer.write_fmt(args);
            let required = writer.required;

            if self.position + required < self.data.len() {
                self.position += required;
                self.data[self.position] = 0;
                return Ok(());
            }

            self.grow(self.position + required + 1)?;
        }
    }

    /// Append a homogeneous array of values, separated by `", "`.
    pub fn append_array(&mut self, values: &Values<'_>) -> Result<(), Error> {
        self.append_fmt(format_args!("{values}"))
    }

    fn grow(&mut self, min_capacity: usize) -> Result<(), Error> {
        let mut capacity = self.data.len();
        while capacity < min_capacity {
            capacity = capacity.checked_mul(2).unwrap_or(min_capacity);
        }
        self.data.try_reserve_exact(capacity - self.data.len())?;
        self.data.resize(capacity, 0);
        Ok(())
    }
}

/// `len` copies of `value`, failing with [`Error::Allocation`] instead of aborting.
pub(crate) fn filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, Error> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, value);
    Ok(values)
}

/// Collect `items` into a vector reserved up front.
pub(crate) fn try_collect<T>(items: impl ExactSizeIterator<Item = T>) -> Result<Vec<T>, Error> {
    let mut values = Vec::new();
    values.try_reserve_exact(items.len())?;
    values.extend(items);
    Ok(values)
}

/// Null-terminated copies of `values` to hand to the FMU.
pub(crate) fn c_strings(values: &[&str]) -> Result<Vec<CString>, Error> {
    let mut strings = Vec::new();
    strings.try_reserve_exact(values.len())?;
    for value in values {
        strings.push(CString::new(*value)?);
    }
    Ok(strings)
}

/// Copies as much as fits and counts everything, like `vsnprintf`.
struct Truncating<'a> {
    buffer: &'a mut [u8],
    required: usize,
}

impl fmt::Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let start = self.required.min(self.buffer.len());
        let end = (self.required + s.len()).min(self.buffer.len());
        self.buffer[start..end].copy_from_slice(&s.as_bytes()[..end - start]);
        self.required += s.len();
        Ok(())
    }
}

/// Fixed-size text sink for rendering a single number without allocating.
struct StackText<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> StackText<N> {
    fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        // Only whole `&str`s are ever copied in.
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl<const N: usize> fmt::Write for StackText<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        self.bytes
            .get_mut(self.len..end)
            .ok_or(fmt::Error)?
            .copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// A floating point value rendered like C's `%.<precision>g`. The precision is capped at
/// [`GFloat::MAX_PRECISION`] significant digits.
#[derive(Debug, Clone, Copy)]
pub struct GFloat {
    pub value: f64,
    pub precision: usize,
}

impl GFloat {
    /// Enough digits to tell any two `f64` apart.
    pub const MAX_PRECISION: usize = 17;

    /// `%.7g`, the format for 32-bit floats.
    pub fn f32(value: f32) -> Self {
        Self {
            value: value as f64,
            precision: 7,
        }
    }

    /// `%.16g`, the format for 64-bit floats.
    pub fn f64(value: f64) -> Self {
        Self {
            value,
            precision: 16,
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl Display for GFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        let precision = self.precision.clamp(1, Self::MAX_PRECISION);

        if value.is_nan() {
            return f.write_str(if value.is_sign_negative() { "-nan" } else { "nan" });
        }
        if value.is_infinite() {
            return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0" } else { "0" });
        }

        // The exponent has to be taken after rounding to `precision` digits.
        let mut scientific = StackText::<32>::new();
        write!(scientific, "{:.*e}", precision - 1, value)?;
        let scientific = scientific.as_str();
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if exponent < -4 || exponent >= precision as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
        } else {
            let decimals = (precision as i32 - 1 - exponent) as usize;
            let mut fixed = StackText::<40>::new();
            write!(fixed, "{:.*}", decimals, value)?;
            f.write_str(trim_fraction(fixed.as_str()))
        }
    }
}

/// Variable types that can be rendered by [`MessageBuffer::append_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Float32,
    DiscreteFloat32,
    Float64,
    DiscreteFloat64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Boolean,
    String,
    Binary,
    Clock,
    ValueReference,
    SizeT,
}

/// Booleans have a different C representation in each FMI version.
#[derive(Debug, Clone, Copy)]
pub enum Booleans<'a> {
    /// `fmiBoolean` is a `char`
    Fmi1(&'a [c_char]),
    /// `fmi2Boolean` is an `int`
    Fmi2(&'a [c_int]),
    /// `fmi3Boolean` is a C99 `bool`
    Fmi3(&'a [bool]),
}

/// An array of C strings as passed to or returned from `GetString` and `SetString`.
#[derive(Debug, Clone, Copy)]
pub struct Strings<'a>(&'a [*const c_char]);

impl<'a> Strings<'a> {
    /// # Safety
    /// Every non-null pointer must point to a valid null-terminated string that outlives `'a`.
    pub unsafe fn new(values: &'a [*const c_char]) -> Self {
        Self(values)
    }
}

/// An array of binary values with their sizes in bytes.
#[derive(Debug, Clone, Copy)]
pub struct Binaries<'a> {
    sizes: &'a [usize],
    values: &'a [*const u8],
}

impl<'a> Binaries<'a> {
    /// # Safety
    /// Every non-null `values[i]` must point to at least `sizes[i]` readable bytes that outlive
    /// `'a`.
    pub unsafe fn new(sizes: &'a [usize], values: &'a [*const u8]) -> Self {
        Self { sizes, values }
    }
}

/// A borrowed homogeneous array of values.
#[derive(Debug, Clone, Copy)]
pub enum Values<'a> {
    Float32(&'a [f32]),
    /// Rendered like [`Values::Float32`]
    DiscreteFloat32(&'a [f32]),
    Float64(&'a [f64]),
    /// Rendered like [`Values::Float64`]
    DiscreteFloat64(&'a [f64]),
    Int8(&'a [i8]),
    UInt8(&'a [u8]),
    Int16(&'a [i16]),
    UInt16(&'a [u16]),
    Int32(&'a [i32]),
    UInt32(&'a [u32]),
    Int64(&'a [i64]),
    UInt64(&'a [u64]),
    Boolean(Booleans<'a>),
    String(Strings<'a>),
    Binary(Binaries<'a>),
    Clock(&'a [bool]),
    ValueReference(&'a [u32]),
    SizeT(&'a [usize]),
}

impl Values<'_> {
    pub fn variable_type(&self) -> VariableType {
        match self {
            Values::Float32(_) => VariableType::Float32,
            Values::DiscreteFloat32(_) => VariableType::DiscreteFloat32,
            Values::Float64(_) => VariableType::Float64,
            Values::DiscreteFloat64(_) => VariableType::DiscreteFloat64,
            Values::Int8(_) => VariableType::Int8,
            Values::UInt8(_) => VariableType::UInt8,
            Values::Int16(_) => VariableType::Int16,
            Values::UInt16(_) => VariableType::UInt16,
            Values::Int32(_) => VariableType::Int32,
            Values::UInt32(_) => VariableType::UInt32,
            Values::Int64(_) => VariableType::Int64,
            Values::UInt64(_) => VariableType::UInt64,
            Values::Boolean(_) => VariableType::Boolean,
            Values::String(_) => VariableType::String,
            Values::Binary(_) => VariableType::Binary,
            Values::Clock(_) => VariableType::Clock,
            Values::ValueReference(_) => VariableType::ValueReference,
            Values::SizeT(_) => VariableType::SizeT,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Float32(v) | Values::DiscreteFloat32(v) => v.len(),
            Values::Float64(v) | Values::DiscreteFloat64(v) => v.len(),
            Values::Int8(v) => v.len(),
            Values::UInt8(v) => v.len(),
            Values::Int16(v) => v.len(),
            Values::UInt16(v) => v.len(),
            Values::Int32(v) => v.len(),
            Values::UInt32(v) => v.len(),
            Values::Int64(v) => v.len(),
            Values::UInt64(v) => v.len(),
            Values::Boolean(Booleans::Fmi1(v)) => v.len(),
            Values::Boolean(Booleans::Fmi2(v)) => v.len(),
            Values::Boolean(Booleans::Fmi3(v)) => v.len(),
            Values::String(v) => v.0.len(),
            Values::Binary(v) => v.values.len().min(v.sizes.len()),
            Values::Clock(v) => v.len(),
            Values::ValueReference(v) => v.len(),
            Values::SizeT(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn join<T>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    mut element: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        element(f, item)?;
    }
    Ok(())
}

impl Display for Values<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Values::Float32(v) | Values::DiscreteFloat32(v) => {
                join(f, v, |f, x| write!(f, "{}", GFloat::f32(*x)))
            }
            Values::Float64(v) | Values::DiscreteFloat64(v) => {
                join(f, v, |f, x| write!(f, "{}", GFloat::f64(*x)))
            }
            Values::Int8(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::UInt8(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::Int16(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::UInt16(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::Int32(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::UInt32(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::Int64(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::UInt64(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::Boolean(Booleans::Fmi1(v)) => join(f, v, |f, x| write!(f, "{}", *x as i32)),
            Values::Boolean(Booleans::Fmi2(v)) => join(f, v, |f, x| write!(f, "{x}")),
            Values::Boolean(Booleans::Fmi3(v)) => join(f, v, |f, x| write!(f, "{}", *x as u8)),
            Values::String(Strings(v)) => join(f, v, |f, x| {
                if x.is_null() {
                    f.write_str("NULL")
                } else {
                    // Safety: guaranteed by `Strings::new`
                    let s = unsafe { CStr::from_ptr(*x) };
                    write!(f, "\"{}\"", s.to_string_lossy())
                }
            }),
            Values::Binary(Binaries { sizes, values }) => {
                join(f, sizes.iter().zip(values), |f, (size, value)| {
                    if value.is_null() {
                        return f.write_str("NULL");
                    }
                    // Safety: guaranteed by `Binaries::new`
                    let bytes = unsafe { std::slice::from_raw_parts(*value, *size) };
                    f.write_str("0x")?;
                    bytes.iter().try_for_each(|b| write!(f, "{b:02x}"))
                })
            }
            Values::Clock(v) => join(f, v, |f, x| write!(f, "{}", *x as u8)),
            Values::ValueReference(v) => join(f, v, |f, x| write!(f, "{x}")),
            Values::SizeT(v) => join(f, v, |f, x| write!(f, "{x}")),
        }
    }
}
