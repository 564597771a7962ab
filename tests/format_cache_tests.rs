use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bullet_chart::core::{
    BuiltinFormatter, FormatCache, FormatSpec, FormatterFactory, ValueFormatter,
};
use chrono::{TimeZone, Utc};

#[derive(Debug, Default)]
struct CountingFactory {
    created: Arc<AtomicUsize>,
}

impl FormatterFactory for CountingFactory {
    fn create(&self, spec: &FormatSpec) -> Arc<dyn ValueFormatter> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(BuiltinFormatter::from_spec(spec))
    }
}

fn counting_cache() -> (FormatCache, Arc<AtomicUsize>) {
    let created = Arc::new(AtomicUsize::new(0));
    let factory = CountingFactory {
        created: Arc::clone(&created),
    };
    (FormatCache::new(Box::new(factory)), created)
}

#[test]
fn equal_specs_share_one_formatter() {
    let (mut cache, created) = counting_cache();
    let spec = FormatSpec::with_format(Some("#,0.00"));

    assert_eq!(cache.format(1234.5, &spec), "1,234.50");
    assert_eq!(cache.format(99.0, &spec.clone()), "99.00");
    assert_eq!(cache.format(0.5, &FormatSpec::with_format(Some("#,0.00"))), "0.50");

    assert_eq!(created.load(Ordering::SeqCst), 1);
    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.size), (2, 1, 1));
}

#[test]
fn distinct_specs_each_get_an_entry() {
    let (mut cache, created) = counting_cache();
    let plain = FormatSpec::default();
    let german = FormatSpec {
        format: Some("#,0.00".to_owned()),
        culture: Some("de-DE".to_owned()),
        ..FormatSpec::default()
    };
    let precise = FormatSpec {
        precision: Some(3),
        ..FormatSpec::default()
    };

    assert_eq!(cache.format(75.0, &plain), "75");
    assert_eq!(cache.format(1234.5, &german), "1.234,50");
    assert_eq!(cache.format(2.0, &precise), "2.000");

    assert_eq!(created.load(Ordering::SeqCst), 3);
    assert_eq!(cache.stats().size, 3);
}

#[test]
fn entries_are_never_evicted() {
    let (mut cache, created) = counting_cache();
    let specs: Vec<FormatSpec> = (0..8)
        .map(|precision| FormatSpec {
            precision: Some(precision),
            ..FormatSpec::default()
        })
        .collect();

    for _ in 0..3 {
        for spec in &specs {
            let _ = cache.formatter(spec);
        }
    }

    assert_eq!(created.load(Ordering::SeqCst), specs.len());
    let stats = cache.stats();
    assert_eq!(stats.size, specs.len());
    assert_eq!(stats.misses, specs.len() as u64);
    assert_eq!(stats.hits, 2 * specs.len() as u64);
}

#[test]
fn canonical_key_tracks_every_field() {
    let base = FormatSpec::with_format(Some("0.0"));
    assert_eq!(base.canonical_key(), base.clone().canonical_key());

    let with_culture = FormatSpec {
        culture: Some("fr-FR".to_owned()),
        ..base.clone()
    };
    assert_ne!(base.canonical_key(), with_culture.canonical_key());
}

#[test]
fn cached_formatters_render_dates() {
    let mut cache = FormatCache::default();
    let formatter = cache.formatter(&FormatSpec::with_format(Some("dd/MM/yyyy")));
    let date = Utc
        .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
        .single()
        .expect("valid date");

    assert_eq!(formatter.format_date(date), "09/03/2024");
}
