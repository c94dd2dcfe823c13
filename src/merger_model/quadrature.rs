//! Adaptive 21 point Gauss–Kronrod quadrature.
//!
//! Globally adaptive bisection: the segment with the largest error estimate is
//! split until the requested tolerance is met or the subdivision limit is hit.
//! The limit bounds the amount of work, so integration always terminates.
//! Reversed bounds (a > b) are allowed and yield the negated integral.
use derivative::Derivative;
use kahan::KahanSummator;
use serde::{Serialize, Deserialize};
use thiserror::Error;

// abscissae of the 21 point Kronrod rule, xgk[1], xgk[3], ... are the 10 point Gauss nodes
const XGK: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0
];

const WGK: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_600_525_397_839,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821
];

const WG: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338
];

#[derive(Debug, Clone, Copy, Derivative, Serialize, Deserialize, PartialEq)]
#[derivative(Default)]
pub struct QuadOptions{
    #[derivative(Default(value="1.49e-8"))]
    pub epsabs: f64,
    #[derivative(Default(value="1.49e-8"))]
    pub epsrel: f64,
    /// maximum number of segments
    #[derivative(Default(value="50"))]
    pub limit: usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadResult{
    pub value: f64,
    pub abs_err: f64,
    pub segments: usize,
    pub evaluations: usize
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum QuadError{
    #[error("subdivision limit of {limit} reached (value {value}, error estimate {abs_err})")]
    SubdivisionLimit{
        limit: usize,
        value: f64,
        abs_err: f64
    },
    #[error("integrand produced a non-finite value")]
    NonFinite,
    #[error("non-finite integration bounds [{0}, {1}]")]
    InvalidBounds(f64, f64)
}

#[derive(Debug, Clone, Copy)]
struct Segment{
    a: f64,
    b: f64,
    value: f64,
    abs_err: f64
}

fn kronrod21<F>(f: &F, a: f64, b: f64) -> Segment
where F: Fn(f64) -> f64
{
    let center = 0.5 * (a + b);
    // signed, so reversed bounds flip the sign of the result
    let half = 0.5 * (b - a);
    let abs_half = half.abs();

    let mut fv1 = [0.0; 10];
    let mut fv2 = [0.0; 10];

    let fc = f(center);
    let mut res_gauss = 0.0;
    let mut res_kronrod = WGK[10] * fc;
    let mut res_abs = res_kronrod.abs();

    for j in 0..5 {
        let jtw = 2 * j + 1;
        let absc = half * XGK[jtw];
        let f1 = f(center - absc);
        let f2 = f(center + absc);
        fv1[jtw] = f1;
        fv2[jtw] = f2;
        let sum = f1 + f2;
        res_gauss += WG[j] * sum;
        res_kronrod += WGK[jtw] * sum;
        res_abs += WGK[jtw] * (f1.abs() + f2.abs());
    }

    for j in 0..5 {
        let jtwm1 = 2 * j;
        let absc = half * XGK[jtwm1];
        let f1 = f(center - absc);
        let f2 = f(center + absc);
        fv1[jtwm1] = f1;
        fv2[jtwm1] = f2;
        res_kronrod += WGK[jtwm1] * (f1 + f2);
        res_abs += WGK[jtwm1] * (f1.abs() + f2.abs());
    }

    let mean = res_kronrod * 0.5;
    let mut res_asc = WGK[10] * (fc - mean).abs();
    for j in 0..10 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_kronrod * half;
    res_abs *= abs_half;
    res_asc *= abs_half;
    let mut abs_err = ((res_kronrod - res_gauss) * half).abs();

    if res_asc != 0.0 && abs_err != 0.0 {
        abs_err = res_asc * (200.0 * abs_err / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        abs_err = abs_err.max(50.0 * f64::EPSILON * res_abs);
    }

    Segment { a, b, value, abs_err }
}

const EVALS_PER_SEGMENT: usize = 21;

/// Integrate `f` from `a` to `b`.
pub fn integrate<F>(f: F, a: f64, b: f64, options: &QuadOptions) -> Result<QuadResult, QuadError>
where F: Fn(f64) -> f64
{
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadError::InvalidBounds(a, b));
    }
    if a == b {
        return Ok(QuadResult { value: 0.0, abs_err: 0.0, segments: 0, evaluations: 0 });
    }

    let limit = options.limit.max(1);
    let first = kronrod21(&f, a, b);
    let mut segments = vec![first];
    let mut evaluations = EVALS_PER_SEGMENT;

    loop {
        if segments.iter().any(|s| !s.value.is_finite() || !s.abs_err.is_finite()) {
            return Err(QuadError::NonFinite);
        }
        let value: f64 = segments.iter()
            .map(|s| s.value)
            .kahan_sum()
            .sum();
        let abs_err: f64 = segments.iter()
            .map(|s| s.abs_err)
            .kahan_sum()
            .sum();

        let tolerance = options.epsabs.max(options.epsrel * value.abs());
        if abs_err <= tolerance {
            return Ok(
                QuadResult { value, abs_err, segments: segments.len(), evaluations }
            );
        }
        if segments.len() >= limit {
            return Err(QuadError::SubdivisionLimit { limit, value, abs_err });
        }

        // bisect the worst segment
        let (worst_idx, _) = segments.iter()
            .enumerate()
            .max_by(|(_, l), (_, r)| l.abs_err.total_cmp(&r.abs_err))
            .expect("segments are never empty");
        let worst = segments.swap_remove(worst_idx);
        let mid = 0.5 * (worst.a + worst.b);
        segments.push(kronrod21(&f, worst.a, mid));
        segments.push(kronrod21(&f, mid, worst.b));
        evaluations += 2 * EVALS_PER_SEGMENT;
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn kronrod_weights_sum_to_two()
    {
        let sum: f64 = WGK[..10].iter().sum::<f64>() * 2.0 + WGK[10];
        assert!((sum - 2.0).abs() < 1e-14);
        let sum: f64 = WG.iter().sum::<f64>() * 2.0;
        assert!((sum - 2.0).abs() < 1e-14);
    }

    #[test]
    fn polynomial_exact()
    {
        let opts = QuadOptions::default();
        let res = integrate(|x| 3.0 * x * x - 2.0 * x + 1.0, 0.0, 2.0, &opts).unwrap();
        assert!((res.value - 6.0).abs() < 1e-12);
        assert_eq!(res.segments, 1);
        assert_eq!(res.evaluations, 21);
    }

    #[test]
    fn reversed_bounds_flip_sign()
    {
        let opts = QuadOptions::default();
        let forward = integrate(f64::exp, 0.3, 3.0, &opts).unwrap();
        let backward = integrate(f64::exp, 3.0, 0.3, &opts).unwrap();
        let exact = 3.0_f64.exp() - 0.3_f64.exp();
        assert!((forward.value - exact).abs() < 1e-10);
        assert!((backward.value + exact).abs() < 1e-10);
    }

    #[test]
    fn needs_subdivision()
    {
        let opts = QuadOptions::default();
        // peaked integrand, a single 21 point rule is not enough
        let res = integrate(|x| 1.0 / (1e-4 + x * x), -1.0, 1.0, &opts).unwrap();
        let exact = 2.0 * (1.0_f64 / 1e-2).atan() / 1e-2;
        assert!((res.value - exact).abs() / exact < 1e-7);
        assert!(res.segments > 1);
    }

    #[test]
    fn empty_interval()
    {
        let res = integrate(|x| x, 1.0, 1.0, &QuadOptions::default()).unwrap();
        assert_eq!(res.value, 0.0);
    }

    #[test]
    fn non_finite_integrand()
    {
        let res = integrate(|_| f64::NAN, 0.0, 1.0, &QuadOptions::default());
        assert_eq!(res, Err(QuadError::NonFinite));
        let res = integrate(|x| 1.0 / x, 0.0, 1.0, &QuadOptions::default());
        assert!(res.is_err());
    }

    #[test]
    fn limit_terminates()
    {
        let opts = QuadOptions{ limit: 3, ..Default::default() };
        let res = integrate(|x| (1.0 / x).sin(), 1e-6, 1.0, &opts);
        assert!(
            matches!(res, Err(QuadError::SubdivisionLimit{limit: 3, ..}))
        );
    }

    #[test]
    fn infinite_bounds_rejected()
    {
        let res = integrate(|x| x, 0.0, f64::INFINITY, &QuadOptions::default());
        assert!(matches!(res, Err(QuadError::InvalidBounds(..))));
    }
}
