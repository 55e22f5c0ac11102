//! JPL DE and IMCCE INPOP binary ephemeris evaluation
//!
//! Reads the classic DE-series binary distribution (DE200, DE405, DE406,
//! DE421, ...) and INPOP's DE-compatible variant, and computes planet
//! positions by Chebyshev interpolation of the file's precomputed
//! coefficients.
//!
//! Byte order is discovered from the header, so a file produced on a
//! big-endian host loads unchanged on a little-endian one and vice
//! versa. After [`JplEphemeris::load`] returns, the ephemeris is
//! immutable and queries are pure functions of it.
//!
//! # Main Components
//!
//! - [`binread`] - endian-aware primitive readers
//! - [`chebyshev`] - Chebyshev series evaluation
//! - [`items`] - body identifiers
//! - [`errors`] - error types

pub mod binread;
pub mod chebyshev;
pub mod errors;
pub mod items;

#[cfg(test)]
mod tests;

pub use self::errors::{JplEphError, Result};
pub use self::items::{JplEphItem, N_ITEMS};

use std::io::Read;

use nalgebra::Vector3;

use self::binread::{get_f64, get_u32, read_f64, read_u32};

/// Number of constant-name slots in the header
const N_CONSTANTS: usize = 400;
/// Bytes per constant name
const CONSTANT_NAME_LENGTH: usize = 6;
/// Bytes per header label line
const LABEL_SIZE: usize = 84;

/// Fixed header size: labels, constant names, time span, constant count,
/// au, Earth-Moon mass ratio, per-item coefficient table, DE number,
/// libration entry.
const HEADER_SIZE: usize = 3 * LABEL_SIZE
    + N_CONSTANTS * CONSTANT_NAME_LENGTH
    + 3 * 8
    + 4
    + 8
    + 8
    + N_ITEMS * 12
    + 4
    + 12;

/// Byte offset of the start/end/interval doubles
const DATES_OFFSET: usize = 3 * LABEL_SIZE + N_CONSTANTS * CONSTANT_NAME_LENGTH;
/// Byte offset of the per-item coefficient table
const COEFF_TABLE_OFFSET: usize = DATES_OFFSET + 3 * 8 + 4 + 8 + 8;
/// Byte offset of the DE number
const DE_NUM_OFFSET: usize = COEFF_TABLE_OFFSET + N_ITEMS * 12;
/// Byte offset of the libration coefficient entry
const LIBRATION_OFFSET: usize = DE_NUM_OFFSET + 4;

/// Hard ceiling on per-series coefficient counts
const MAX_CHEBYSHEV_COEFFS: u32 = 32;
/// Sanity cap (in doubles) against corrupt record-size fields
const MAX_RECORD_SIZE: u32 = 1 << 20;
/// Sanity cap on the record count implied by the header time span
const MAX_RECORDS: usize = 1 << 20;

/// DE number reported by INPOP DE-compatible files
const INPOP_DE_COMPATIBLE: u32 = 100;
/// Lowest DE release number accepted
const DE200: u32 = 200;

/// `nGranules` value marking a single span covering the whole interval
const WHOLE_INTERVAL: u32 = u32::MAX;

/// Per-item coefficient layout within a record
#[derive(Clone, Copy, Debug, Default)]
struct CoeffInfo {
    /// 0-based index of the item's first coefficient in a record's
    /// `coeffs` array (the file stores a 1-based index over the whole
    /// record including t0/t1; the loader subtracts 3)
    offset: u32,
    /// Chebyshev coefficients per component per granule
    n_coeffs: u32,
    /// Granules per interval, or [`WHOLE_INTERVAL`]
    n_granules: u32,
}

/// One time-indexed coefficient record
#[derive(Clone, Debug)]
struct JplEphRecord {
    /// Inclusive start of the record's span, TDB Julian date
    t0: f64,
    /// Exclusive end of the record's span; t1 - t0 is the file's
    /// interval length
    t1: f64,
    /// `record_size - 2` doubles of Chebyshev coefficients
    coeffs: Vec<f64>,
}

/// A loaded DE/INPOP ephemeris
///
/// Immutable once loaded; [`planet_position`](JplEphemeris::planet_position)
/// may be called concurrently from any number of threads.
#[derive(Debug)]
pub struct JplEphemeris {
    de_num: u32,
    start_date: f64,
    end_date: f64,
    days_per_interval: f64,
    au: f64,
    earth_moon_mass_ratio: f64,
    swap_bytes: bool,
    record_size: u32,
    labels: [String; 3],
    coeff_info: [CoeffInfo; N_ITEMS],
    libration_coeff_info: CoeffInfo,
    records: Vec<JplEphRecord>,
}

/// Effective granule count for sizing; the whole-interval sentinel
/// occupies a single span.
fn spans(n_granules: u32) -> u32 {
    if n_granules == WHOLE_INTERVAL {
        1
    } else {
        n_granules
    }
}

/// Consume and discard `n` bytes from the stream.
fn skip<R: Read>(r: &mut R, n: u64) -> Result<()> {
    let copied = std::io::copy(&mut r.take(n), &mut std::io::sink())?;
    if copied != n {
        return Err(JplEphError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "ephemeris ends inside a record",
        )));
    }
    Ok(())
}

impl JplEphemeris {
    /// Load a DE or INPOP ephemeris from a byte stream.
    ///
    /// The stream is consumed through the last coefficient record.
    /// Returns [`JplEphError::InvalidFormat`] when the header fails
    /// byte-order discrimination or is internally inconsistent, and
    /// [`JplEphError::Io`] when the stream ends early.
    pub fn load<R: Read>(r: &mut R) -> Result<JplEphemeris> {
        let mut header = vec![0u8; HEADER_SIZE];
        r.read_exact(&mut header)?;

        // The DE number discriminates byte order before anything else in
        // the header can be interpreted.
        let de_native = get_u32(&header, DE_NUM_OFFSET, false);
        let de_swapped = de_native.swap_bytes();

        let (swap_bytes, de_num) = if de_native == INPOP_DE_COMPATIBLE {
            (false, de_native)
        } else if de_swapped == INPOP_DE_COMPATIBLE {
            (true, de_swapped)
        } else if de_native > (1 << 15) && de_swapped >= DE200 {
            (true, de_swapped)
        } else if de_native <= (1 << 15) && de_native >= DE200 {
            (false, de_native)
        } else {
            return Err(JplEphError::InvalidFormat(format!(
                "unrecognized DE number {de_native:#010x}"
            )));
        };

        let mut labels: [String; 3] = Default::default();
        for (i, label) in labels.iter_mut().enumerate() {
            *label = String::from_utf8_lossy(&header[i * LABEL_SIZE..(i + 1) * LABEL_SIZE])
                .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string();
        }

        let start_date = get_f64(&header, DATES_OFFSET, swap_bytes);
        let end_date = get_f64(&header, DATES_OFFSET + 8, swap_bytes);
        let days_per_interval = get_f64(&header, DATES_OFFSET + 16, swap_bytes);
        let au = get_f64(&header, DATES_OFFSET + 28, swap_bytes);
        let earth_moon_mass_ratio = get_f64(&header, DATES_OFFSET + 36, swap_bytes);

        if !(days_per_interval > 0.0 && end_date > start_date) {
            return Err(JplEphError::InvalidFormat(format!(
                "bad time span {start_date}..{end_date} step {days_per_interval}"
            )));
        }

        let mut coeff_info = [CoeffInfo::default(); N_ITEMS];
        for (i, info) in coeff_info.iter_mut().enumerate() {
            *info = Self::read_coeff_info(&header, COEFF_TABLE_OFFSET + i * 12, swap_bytes)?;
        }
        let libration_coeff_info = Self::read_coeff_info(&header, LIBRATION_OFFSET, swap_bytes)?;

        // Record size in doubles: per-item contributions (the final item
        // is the 2-component nutation series), librations, and the
        // leading t0/t1 pair.
        let mut computed_size: u64 = 2;
        for (i, info) in coeff_info.iter().enumerate() {
            let components: u64 = if i == N_ITEMS - 1 { 2 } else { 3 };
            computed_size +=
                u64::from(info.n_coeffs) * u64::from(spans(info.n_granules)) * components;
        }
        computed_size += u64::from(libration_coeff_info.n_coeffs)
            * u64::from(spans(libration_coeff_info.n_granules))
            * 3;

        // INPOP stores the record size explicitly; DE files imply it.
        // Either way the header record is padded out to record_size * 8
        // bytes, and the record after it holds constant values we don't
        // need.
        let record_size = if de_num == INPOP_DE_COMPATIBLE {
            let rs = read_u32(r, swap_bytes)?;
            if rs > MAX_RECORD_SIZE || (u64::from(rs) * 8) < (HEADER_SIZE + 4) as u64 {
                return Err(JplEphError::InvalidFormat(format!(
                    "implausible INPOP record size {rs}"
                )));
            }
            skip(r, u64::from(rs) * 8 - HEADER_SIZE as u64 - 4)?;
            rs
        } else {
            if computed_size > u64::from(MAX_RECORD_SIZE) || computed_size * 8 < HEADER_SIZE as u64
            {
                return Err(JplEphError::InvalidFormat(format!(
                    "implausible record size {computed_size}"
                )));
            }
            let rs = computed_size as u32;
            skip(r, u64::from(rs) * 8 - HEADER_SIZE as u64)?;
            rs
        };
        skip(r, u64::from(record_size) * 8)?;

        // With the final size known, pin every item inside the record so
        // evaluation can never index out of a coefficient array.
        let coeff_len = record_size as usize - 2;
        for (i, info) in coeff_info.iter().enumerate() {
            let components = if i == N_ITEMS - 1 { 2 } else { 3 };
            Self::check_extent(info, components, coeff_len, "item")?;
        }
        Self::check_extent(&libration_coeff_info, 3, coeff_len, "libration")?;

        let n_records = ((end_date - start_date) / days_per_interval) as usize;
        if n_records == 0 || n_records > MAX_RECORDS {
            return Err(JplEphError::InvalidFormat(format!(
                "implausible record count {n_records}"
            )));
        }

        let mut records = Vec::with_capacity(n_records);
        for _ in 0..n_records {
            let t0 = read_f64(r, swap_bytes)?;
            let t1 = read_f64(r, swap_bytes)?;
            if (t1 - t0 - days_per_interval).abs() > 1e-6 {
                return Err(JplEphError::InvalidFormat(format!(
                    "record spans {t0}..{t1}, expected {days_per_interval} days"
                )));
            }
            let mut coeffs = Vec::with_capacity(coeff_len);
            for _ in 0..coeff_len {
                coeffs.push(read_f64(r, swap_bytes)?);
            }
            records.push(JplEphRecord { t0, t1, coeffs });
        }

        Ok(JplEphemeris {
            de_num,
            start_date,
            end_date,
            days_per_interval,
            au,
            earth_moon_mass_ratio,
            swap_bytes,
            record_size,
            labels,
            coeff_info,
            libration_coeff_info,
            records,
        })
    }

    fn read_coeff_info(header: &[u8], base: usize, swap: bool) -> Result<CoeffInfo> {
        let raw_offset = get_u32(header, base, swap);
        let n_coeffs = get_u32(header, base + 4, swap);
        let n_granules = get_u32(header, base + 8, swap);

        // An all-zero entry marks a body absent from this release
        // (DE406 ships without nutation and libration data).
        if raw_offset == 0 && n_coeffs == 0 && n_granules == 0 {
            return Ok(CoeffInfo::default());
        }

        let offset = raw_offset.checked_sub(3).ok_or_else(|| {
            JplEphError::InvalidFormat(format!("coefficient offset {raw_offset} before the data"))
        })?;
        if n_coeffs > MAX_CHEBYSHEV_COEFFS {
            return Err(JplEphError::InvalidFormat(format!(
                "coefficient count {n_coeffs} above the {MAX_CHEBYSHEV_COEFFS} ceiling"
            )));
        }
        if n_granules == 0 {
            return Err(JplEphError::InvalidFormat(
                "zero granules for a present item".to_string(),
            ));
        }
        Ok(CoeffInfo {
            offset,
            n_coeffs,
            n_granules,
        })
    }

    fn check_extent(
        info: &CoeffInfo,
        components: usize,
        coeff_len: usize,
        what: &str,
    ) -> Result<()> {
        if info.n_coeffs == 0 {
            return Ok(());
        }
        let end = info.offset as usize
            + info.n_coeffs as usize * spans(info.n_granules) as usize * components;
        if end > coeff_len {
            return Err(JplEphError::InvalidFormat(format!(
                "{what} coefficients overrun the record ({end} > {coeff_len})"
            )));
        }
        Ok(())
    }

    /// Position of `item` at TDB Julian date `tjd`.
    ///
    /// Kilometers relative to the solar system barycenter, except the
    /// Moon, which is geocentric. Times outside the span covered by the
    /// file are clamped to it. Asking for [`JplEphItem::Nutation`] or a
    /// body absent from the file is a programming error and yields the
    /// zero vector.
    pub fn planet_position(&self, item: JplEphItem, tjd: f64) -> Vector3<f64> {
        // The barycenter is the origin
        if item == JplEphItem::Ssb {
            return Vector3::zeros();
        }

        // The Earth is not stored; derive it from the Earth-Moon
        // barycenter and the geocentric Moon.
        if item == JplEphItem::Earth {
            let emb = self.planet_position(JplEphItem::EarthMoonBary, tjd);
            let moon = self.planet_position(JplEphItem::Moon, tjd);
            return emb - moon * (1.0 / (self.earth_moon_mass_ratio + 1.0));
        }

        let info = match item {
            JplEphItem::Libration => self.libration_coeff_info,
            JplEphItem::Nutation => {
                debug_assert!(false, "nutation is a 2-component series, not a position");
                return Vector3::zeros();
            }
            _ => match item.stored_index() {
                Some(idx) => self.coeff_info[idx],
                None => unreachable!("virtual items handled above"),
            },
        };
        if info.n_coeffs == 0 {
            debug_assert!(false, "{} absent from this ephemeris", item.name());
            return Vector3::zeros();
        }

        let mut out = [0.0; 3];
        self.evaluate_series(&info, 3, tjd, &mut out);
        Vector3::new(out[0], out[1], out[2])
    }

    /// Nutation angles (Δψ, Δε) at `tjd`, when the file carries a
    /// nutation series.
    pub fn nutation_angles(&self, tjd: f64) -> Option<(f64, f64)> {
        let info = self.coeff_info[JplEphItem::Nutation.stored_index()?];
        if info.n_coeffs == 0 {
            return None;
        }
        let mut out = [0.0; 2];
        self.evaluate_series(&info, 2, tjd, &mut out);
        Some((out[0], out[1]))
    }

    /// Evaluate `components` contiguous Chebyshev series for one item at
    /// `tjd`, clamped to the ephemeris span.
    fn evaluate_series(&self, info: &CoeffInfo, components: usize, tjd: f64, out: &mut [f64]) {
        debug_assert!(info.n_granules >= 1);
        debug_assert!(info.n_coeffs <= MAX_CHEBYSHEV_COEFFS);

        let tjd = tjd.clamp(self.start_date, self.end_date);
        let mut rec_no = ((tjd - self.start_date) / self.days_per_interval) as usize;
        // tjd == end_date lands one past the final record
        if rec_no >= self.records.len() {
            rec_no = self.records.len() - 1;
        }
        let rec = &self.records[rec_no];

        let n_coeffs = info.n_coeffs as usize;
        // u is the normalized time in [-1, 1]; start indexes the first
        // coefficient of the covering span
        let interval = rec.t1 - rec.t0;
        let (start, u) = if info.n_granules == WHOLE_INTERVAL {
            let u = 2.0 * (tjd - rec.t0) / interval - 1.0;
            (info.offset as usize, u)
        } else {
            let days_per_granule = interval / f64::from(info.n_granules);
            let mut granule = ((tjd - rec.t0) / days_per_granule) as usize;
            // tjd == t1 lands one past the final granule
            if granule >= info.n_granules as usize {
                granule = info.n_granules as usize - 1;
            }
            let granule_start = rec.t0 + days_per_granule * granule as f64;
            let u = 2.0 * (tjd - granule_start) / days_per_granule - 1.0;
            (
                info.offset as usize + granule * n_coeffs * components,
                u,
            )
        };

        for (i, slot) in out.iter_mut().enumerate().take(components) {
            let series = &rec.coeffs[start + i * n_coeffs..start + (i + 1) * n_coeffs];
            *slot = chebyshev::evaluate(series, u);
        }
    }

    /// DE release number (100 for INPOP DE-compatible files)
    pub fn de_number(&self) -> u32 {
        self.de_num
    }

    /// First covered TDB Julian date
    pub fn start_date(&self) -> f64 {
        self.start_date
    }

    /// Last covered TDB Julian date
    pub fn end_date(&self) -> f64 {
        self.end_date
    }

    /// Days spanned by one coefficient record
    pub fn days_per_interval(&self) -> f64 {
        self.days_per_interval
    }

    /// Record size in doubles, including the leading t0/t1 pair
    pub fn record_size(&self) -> u32 {
        self.record_size
    }

    /// Whether the file's byte order differs from the host's
    pub fn byte_swapped(&self) -> bool {
        self.swap_bytes
    }

    /// Kilometers per astronomical unit, as recorded in the file
    pub fn au(&self) -> f64 {
        self.au
    }

    /// Earth-Moon mass ratio used by the Earth derivation
    pub fn earth_moon_mass_ratio(&self) -> f64 {
        self.earth_moon_mass_ratio
    }

    /// The three header label lines, trimmed
    pub fn labels(&self) -> &[String; 3] {
        &self.labels
    }
}
