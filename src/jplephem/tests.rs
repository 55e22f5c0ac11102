//! Tests for the jplephem module
//!
//! Binary DE fixtures are too large to check in, so these tests
//! synthesize byte-exact DE/INPOP images instead. Every coefficient
//! block samples a known global polynomial of time, so each position
//! has a closed form to check against, and granule joins are smooth by
//! construction.

use std::io::Cursor;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use super::items::{JplEphItem, N_ITEMS};
use super::{spans, JplEphError, JplEphemeris};

const T0: f64 = 2451536.5;
const DAYS_PER_INTERVAL: f64 = 32.0;
const N_RECORDS: usize = 2;
const T1: f64 = T0 + DAYS_PER_INTERVAL * N_RECORDS as f64;
const AU_KM: f64 = 149_597_870.7;
const EMRAT: f64 = 81.30056;
const N_COEFFS: u32 = 10;
/// Series id used for the libration angles in `poly`
const LIBRATION_SERIES: usize = 12;

/// Quadratic in normalized file time, distinct per series and component
fn poly(series: usize, component: usize) -> (f64, f64, f64) {
    let k = (series * 3 + component) as f64;
    (1000.0 + 100.0 * k, 10.0 + k, 0.5 * k)
}

/// Closed form the coefficients were generated from
fn closed_form(series: usize, component: usize, t: f64) -> f64 {
    let (p0, p1, p2) = poly(series, component);
    let tau = (t - T0) / DAYS_PER_INTERVAL;
    p0 + p1 * tau + p2 * tau * tau
}

fn closed_form_position(series: usize, t: f64) -> Vector3<f64> {
    Vector3::new(
        closed_form(series, 0, t),
        closed_form(series, 1, t),
        closed_form(series, 2, t),
    )
}

struct Fixture {
    swap: bool,
    inpop: bool,
    nutation: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture {
            swap: false,
            inpop: false,
            nutation: true,
        }
    }
}

fn put_u32(buf: &mut Vec<u8>, v: u32, swap: bool) {
    let bytes = v.to_ne_bytes();
    if swap {
        buf.extend(bytes.iter().rev());
    } else {
        buf.extend_from_slice(&bytes);
    }
}

fn put_f64(buf: &mut Vec<u8>, v: f64, swap: bool) {
    let bytes = v.to_bits().to_ne_bytes();
    if swap {
        buf.extend(bytes.iter().rev());
    } else {
        buf.extend_from_slice(&bytes);
    }
}

/// Express the global polynomial for (`series`, component) on one
/// granule's [-1, 1] span as Chebyshev coefficients.
fn fill_series(
    rec: &mut [f64],
    offset_1based: u32,
    n_coeffs: u32,
    n_granules: u32,
    components: u32,
    series: usize,
    record_no: usize,
) {
    let base = offset_1based as usize - 1;
    let g_count = spans(n_granules) as usize;
    for g in 0..g_count {
        // tau(u) = a + h*u on this granule
        let a = record_no as f64 + (g as f64 + 0.5) / g_count as f64;
        let h = 0.5 / g_count as f64;
        for c in 0..components as usize {
            let (p0, p1, p2) = poly(series, c);
            let m0 = p0 + p1 * a + p2 * a * a;
            let m1 = (p1 + 2.0 * p2 * a) * h;
            let m2 = p2 * h * h;
            // u² = (T2 + 1)/2
            let start = base + (g * components as usize + c) * n_coeffs as usize;
            rec[start] = m0 + m2 / 2.0;
            rec[start + 1] = m1;
            rec[start + 2] = m2 / 2.0;
        }
    }
}

impl Fixture {
    fn build(&self) -> Vec<u8> {
        // (n_coeffs, n_granules, components) per stored item
        let mut items: Vec<(u32, u32, u32)> = vec![(N_COEFFS, 1, 3); N_ITEMS];
        items[9].1 = 2; // Moon: two granules per interval
        items[10].1 = u32::MAX; // Sun: whole-interval sentinel
        items[11] = if self.nutation {
            (N_COEFFS, 1, 2)
        } else {
            (0, 0, 2)
        };
        let libration = (N_COEFFS, 1u32, 3u32);

        // 1-based offsets over the record, t0/t1 included
        let mut offsets = Vec::new();
        let mut next = 3u32;
        for &(nc, ng, comp) in &items {
            offsets.push(if nc == 0 { 0 } else { next });
            next += nc * spans(ng) * comp;
        }
        let lib_offset = next;
        next += libration.0 * libration.1 * libration.2;
        let record_size = (next - 1) as usize;

        let swap = self.swap;
        let mut buf = Vec::new();
        for text in ["STARLORE SYNTHETIC EPHEMERIS", "FOR TESTS ONLY", ""] {
            let mut label = [b' '; 84];
            label[..text.len()].copy_from_slice(text.as_bytes());
            buf.extend_from_slice(&label);
        }
        buf.extend(std::iter::repeat(b' ').take(400 * 6));
        put_f64(&mut buf, T0, swap);
        put_f64(&mut buf, T1, swap);
        put_f64(&mut buf, DAYS_PER_INTERVAL, swap);
        put_u32(&mut buf, 2, swap); // nConstants
        put_f64(&mut buf, AU_KM, swap);
        put_f64(&mut buf, EMRAT, swap);
        for (i, &(nc, ng, _)) in items.iter().enumerate() {
            put_u32(&mut buf, offsets[i], swap);
            put_u32(&mut buf, nc, swap);
            put_u32(&mut buf, ng, swap);
        }
        put_u32(&mut buf, if self.inpop { 100 } else { 405 }, swap);
        put_u32(&mut buf, lib_offset, swap);
        put_u32(&mut buf, libration.0, swap);
        put_u32(&mut buf, libration.1, swap);
        assert_eq!(buf.len(), 2856, "header layout drifted");

        if self.inpop {
            put_u32(&mut buf, record_size as u32, swap);
        }
        // pad the header record, then a constants-value record of zeros
        buf.resize(record_size * 8, 0);
        buf.resize(record_size * 8 * 2, 0);

        for r in 0..N_RECORDS {
            let mut rec = vec![0.0f64; record_size];
            let t0 = T0 + DAYS_PER_INTERVAL * r as f64;
            rec[0] = t0;
            rec[1] = t0 + DAYS_PER_INTERVAL;
            for (i, &(nc, ng, comp)) in items.iter().enumerate() {
                if nc == 0 {
                    continue;
                }
                fill_series(&mut rec, offsets[i], nc, ng, comp, i, r);
            }
            fill_series(
                &mut rec,
                lib_offset,
                libration.0,
                libration.1,
                libration.2,
                LIBRATION_SERIES,
                r,
            );
            for v in rec {
                put_f64(&mut buf, v, swap);
            }
        }
        buf
    }

    fn load(&self) -> JplEphemeris {
        JplEphemeris::load(&mut Cursor::new(self.build())).expect("fixture should load")
    }
}

#[test]
fn test_load_header_fields() {
    let eph = Fixture::default().load();
    assert_eq!(eph.de_number(), 405);
    assert!(!eph.byte_swapped());
    assert_eq!(eph.start_date(), T0);
    assert_eq!(eph.end_date(), T1);
    assert_eq!(eph.days_per_interval(), DAYS_PER_INTERVAL);
    assert_eq!(eph.record_size(), 412);
    assert_eq!(eph.au(), AU_KM);
    assert_eq!(eph.earth_moon_mass_ratio(), EMRAT);
    assert_eq!(eph.labels()[0], "STARLORE SYNTHETIC EPHEMERIS");
    assert_eq!(eph.labels()[1], "FOR TESTS ONLY");
    assert_eq!(eph.labels()[2], "");
}

#[test]
fn test_positions_match_closed_form() {
    let eph = Fixture::default().load();
    let times = [T0, T0 + 5.25, T0 + 31.5, T0 + 32.0, T0 + 47.5, T1];
    let bodies = [
        JplEphItem::Mercury,
        JplEphItem::EarthMoonBary,
        JplEphItem::Pluto,
        JplEphItem::Moon,
        JplEphItem::Sun,
    ];
    for &t in &times {
        for &body in &bodies {
            let pos = eph.planet_position(body, t);
            let want = closed_form_position(body.stored_index().unwrap(), t);
            for i in 0..3 {
                assert_relative_eq!(pos[i], want[i], max_relative = 1e-9);
            }
        }
        let lib = eph.planet_position(JplEphItem::Libration, t);
        let want = closed_form_position(LIBRATION_SERIES, t);
        for i in 0..3 {
            assert_relative_eq!(lib[i], want[i], max_relative = 1e-9);
        }
    }
}

#[test]
fn test_ssb_is_origin() {
    let eph = Fixture::default().load();
    for t in [T0 - 100.0, T0, T0 + 17.0, T1 + 100.0] {
        assert_eq!(eph.planet_position(JplEphItem::Ssb, t), Vector3::zeros());
    }
}

#[test]
fn test_earth_derived_from_emb_and_moon() {
    let eph = Fixture::default().load();
    for t in [T0, T0 + 10.5, T0 + 40.0, T1] {
        let earth = eph.planet_position(JplEphItem::Earth, t);
        let moon = eph.planet_position(JplEphItem::Moon, t);
        let emb = eph.planet_position(JplEphItem::EarthMoonBary, t);
        let back = earth + moon * (1.0 / (EMRAT + 1.0));
        for i in 0..3 {
            assert_relative_eq!(back[i], emb[i], max_relative = 1e-14);
        }
    }
}

#[test]
fn test_out_of_range_times_clamp() {
    let eph = Fixture::default().load();
    for &body in &[JplEphItem::Mercury, JplEphItem::Moon, JplEphItem::Earth] {
        assert_eq!(
            eph.planet_position(body, T0 - 1000.0),
            eph.planet_position(body, T0)
        );
        assert_eq!(
            eph.planet_position(body, T1 + 1000.0),
            eph.planet_position(body, T1)
        );
    }
}

#[test]
fn test_granule_joins_are_continuous() {
    let eph = Fixture::default().load();
    // The Moon has two granules per interval: joins at half-interval
    // marks. On each side of a join the position comes from a different
    // coefficient block, but both sample the same global polynomial.
    for boundary in [T0 + 16.0, T0 + 32.0, T0 + 48.0] {
        for t in [boundary - 1e-6, boundary, boundary + 1e-6] {
            let pos = eph.planet_position(JplEphItem::Moon, t);
            let want = closed_form_position(9, t);
            for i in 0..3 {
                assert_relative_eq!(pos[i], want[i], max_relative = 1e-9);
            }
        }
        let below = eph.planet_position(JplEphItem::Moon, boundary - 1e-6);
        let at = eph.planet_position(JplEphItem::Moon, boundary);
        assert!((below - at).norm() < 1e-3, "jump at granule boundary");
    }
}

#[test]
fn test_byte_swapped_image_loads_identically() {
    let native = Fixture::default().load();
    let swapped = Fixture {
        swap: true,
        ..Fixture::default()
    }
    .load();
    assert!(swapped.byte_swapped());
    assert_eq!(swapped.de_number(), 405);
    for t in [T0, T0 + 21.25, T1] {
        for &body in &[JplEphItem::Venus, JplEphItem::Moon, JplEphItem::Earth] {
            assert_eq!(
                native.planet_position(body, t),
                swapped.planet_position(body, t)
            );
        }
    }
}

#[test]
fn test_inpop_explicit_record_size() {
    let eph = Fixture {
        inpop: true,
        ..Fixture::default()
    }
    .load();
    assert_eq!(eph.de_number(), 100);
    assert_eq!(eph.record_size(), 412);
    let pos = eph.planet_position(JplEphItem::Jupiter, T0 + 12.0);
    let want = closed_form_position(JplEphItem::Jupiter.stored_index().unwrap(), T0 + 12.0);
    for i in 0..3 {
        assert_relative_eq!(pos[i], want[i], max_relative = 1e-9);
    }
}

#[test]
fn test_nutation_angles() {
    let eph = Fixture::default().load();
    let (dpsi, deps) = eph.nutation_angles(T0 + 7.0).expect("nutation present");
    assert_relative_eq!(dpsi, closed_form(11, 0, T0 + 7.0), max_relative = 1e-9);
    assert_relative_eq!(deps, closed_form(11, 1, T0 + 7.0), max_relative = 1e-9);
}

#[test]
fn test_absent_nutation() {
    let eph = Fixture {
        nutation: false,
        ..Fixture::default()
    }
    .load();
    assert!(eph.nutation_angles(T0 + 7.0).is_none());
    // other bodies are unaffected by the repacked layout
    let pos = eph.planet_position(JplEphItem::Saturn, T0 + 3.0);
    let want = closed_form_position(JplEphItem::Saturn.stored_index().unwrap(), T0 + 3.0);
    for i in 0..3 {
        assert_relative_eq!(pos[i], want[i], max_relative = 1e-9);
    }
}

#[test]
fn test_truncated_stream_errors() {
    let image = Fixture::default().build();
    for cut in [100, 2856 + 10, image.len() - 40] {
        let err = JplEphemeris::load(&mut Cursor::new(&image[..cut])).unwrap_err();
        assert!(matches!(err, JplEphError::Io(_)), "cut at {cut}: {err}");
    }
}

#[test]
fn test_unrecognized_de_number_rejected() {
    let mut image = Fixture::default().build();
    // 7 fails discrimination in both byte orders
    image[super::DE_NUM_OFFSET..super::DE_NUM_OFFSET + 4].copy_from_slice(&7u32.to_ne_bytes());
    let err = JplEphemeris::load(&mut Cursor::new(image)).unwrap_err();
    assert!(matches!(err, JplEphError::InvalidFormat(_)), "{err}");
}
