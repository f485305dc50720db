//! 성과 계산, 정렬, 정규화의 속성 기반 테스트.

use beat_analytics::performance::{relative_series, total_growth_pct};
use beat_analytics::{align, SeriesNormalizer, WindowSpec};
use beat_core::{NormalizedSeries, PriceField, PricePoint, RawSeries};
use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use proptest::prelude::*;

fn prices(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..10_000.0, min_len..60)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// 날짜 오프셋 집합으로 정규화 시계열 생성 (가격은 오프셋 기반).
fn normalized(symbol: &str, offsets: &std::collections::BTreeSet<u16>) -> NormalizedSeries {
    NormalizedSeries {
        symbol: symbol.to_string(),
        price_field: PriceField::Adjusted,
        points: offsets
            .iter()
            .map(|&o| {
                PricePoint::new(
                    base_date() + chrono::Duration::days(i64::from(o)),
                    f64::from(o) + 1.0,
                )
            })
            .collect(),
        fallback: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn prop_total_growth_matches_definition(p in prices(2)) {
        let expected = (p[p.len() - 1] - p[0]) / p[0] * 100.0;
        prop_assert_eq!(total_growth_pct(&p).unwrap(), expected);
    }

    #[test]
    fn prop_identical_legs_are_flat(p in prices(1)) {
        let relative = relative_series(&p, &p).unwrap();
        prop_assert_eq!(relative.len(), p.len());
        for r in relative {
            prop_assert_eq!(r, 1.0);
        }
    }

    #[test]
    fn prop_relative_starts_at_one_and_is_scale_invariant(
        (main, bench) in (1usize..60).prop_flat_map(|n| (
            prop::collection::vec(0.01f64..10_000.0, n),
            prop::collection::vec(0.01f64..10_000.0, n),
        )),
        k_main in 0.001f64..1_000.0,
        k_bench in 0.001f64..1_000.0,
    ) {
        let base = relative_series(&main, &bench).unwrap();
        prop_assert_eq!(base[0], 1.0);

        let scaled_main: Vec<f64> = main.iter().map(|p| p * k_main).collect();
        let scaled_bench: Vec<f64> = bench.iter().map(|p| p * k_bench).collect();
        let scaled = relative_series(&scaled_main, &scaled_bench).unwrap();

        prop_assert_eq!(scaled[0], 1.0);
        for (a, b) in base.iter().zip(&scaled) {
            prop_assert!(approx(*a, *b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_alignment_is_commutative(
        a in prop::collection::btree_set(0u16..400, 1..80),
        b in prop::collection::btree_set(0u16..400, 1..80),
    ) {
        let left = normalized("A", &a);
        let right = normalized("B", &b);

        match (align(&left, &right), align(&right, &left)) {
            (Ok(ab), Ok(ba)) => {
                prop_assert_eq!(ab.dates(), ba.dates());
                prop_assert_eq!(ab.main_prices(), ba.bench_prices());
                prop_assert_eq!(ab.bench_prices(), ba.main_prices());
                prop_assert!(ab.dates().windows(2).all(|w| w[0] < w[1]));
            }
            (Err(_), Err(_)) => prop_assert!(a.is_disjoint(&b)),
            _ => prop_assert!(false, "alignment result depends on argument order"),
        }
    }

    #[test]
    fn prop_normalizing_twice_is_a_no_op(
        offsets in prop::collection::btree_set(0u16..2000, 1..120),
        days in 1u32..200,
    ) {
        let normalizer = SeriesNormalizer::new(New_York, PriceField::Adjusted);
        let raw = RawSeries::from_prices(
            "SPY",
            &offsets
                .iter()
                .map(|&o| {
                    let date = base_date() + chrono::Duration::days(i64::from(o));
                    let ts = New_York
                        .from_local_datetime(&date.and_hms_opt(16, 0, 0).unwrap())
                        .unwrap()
                        .timestamp();
                    (ts, Some(f64::from(o) + 0.5))
                })
                .collect::<Vec<_>>(),
        );

        for window in [
            WindowSpec::LastEntries { days },
            WindowSpec::Since { year: 2022, from: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() },
            WindowSpec::Since { year: 2031, from: NaiveDate::from_ymd_opt(2031, 1, 1).unwrap() },
        ] {
            let once = normalizer.normalize(&raw, &window).unwrap();
            let twice = normalizer.normalize(&normalizer.to_raw(&once), &window).unwrap();
            prop_assert_eq!(&once, &twice);
        }
    }
}
