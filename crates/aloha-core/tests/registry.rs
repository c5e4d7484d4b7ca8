#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use aloha_core::error::AlohaError;
use aloha_core::metrics::{Opts, Registry, DEFAULT_BUCKETS};

#[test]
fn duplicate_registration_fails() {
    let reg = Registry::new();
    reg.register_counter(Opts::new("requests_total", "Requests.").subsystem("aloha"), &["status"])
        .unwrap();

    let err = reg
        .register_histogram(
            Opts::new("requests_total", "Same name, other kind.").subsystem("aloha"),
            &["status"],
            &DEFAULT_BUCKETS,
        )
        .err()
        .expect("must fail");
    assert_eq!(err, AlohaError::AlreadyRegistered("aloha_requests_total".into()));
    assert_eq!(reg.names(), vec!["aloha_requests_total".to_string()]);
}

#[test]
fn same_name_in_other_subsystem_is_fine() {
    let reg = Registry::new();
    reg.register_counter(Opts::new("requests_total", "a").subsystem("a"), &[]).unwrap();
    reg.register_counter(Opts::new("requests_total", "b").subsystem("b"), &[]).unwrap();
    assert_eq!(reg.names(), vec!["a_requests_total", "b_requests_total"]);
}

#[test]
fn rejects_bad_names() {
    let reg = Registry::new();
    assert!(matches!(
        reg.register_counter(Opts::new("1bad", "x"), &[]),
        Err(AlohaError::InvalidSeries(_))
    ));
    assert!(matches!(
        reg.register_counter(Opts::new("ok_total", "x"), &["sta-tus"]),
        Err(AlohaError::InvalidSeries(_))
    ));
    assert!(matches!(
        reg.register_counter(Opts::new("dup_total", "x"), &["a", "a"]),
        Err(AlohaError::InvalidSeries(_))
    ));
    assert!(matches!(
        reg.register_histogram(Opts::new("h_seconds", "x"), &["le"], &DEFAULT_BUCKETS),
        Err(AlohaError::InvalidSeries(_))
    ));
    assert!(matches!(
        reg.register_histogram(Opts::new("h2_seconds", "x"), &[], &[1.0, 0.5]),
        Err(AlohaError::InvalidSeries(_))
    ));
    assert!(reg.names().is_empty());
}

#[test]
fn label_count_mismatch_records_nothing() {
    let reg = Registry::new();
    let c = reg.register_counter(Opts::new("c_total", "x"), &["status"]).unwrap();

    let err = c.inc(&["200", "GET"]).unwrap_err();
    assert_eq!(
        err,
        AlohaError::LabelCardinality {
            series: "c_total".into(),
            expected: 1,
            got: 2
        }
    );
    assert_eq!(c.total(), 0);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let reg = Registry::new();
    let h = reg
        .register_histogram(Opts::new("d_seconds", "x"), &["path"], &[0.1, 1.0])
        .unwrap();
    assert_eq!(h.bounds(), &[0.1, 1.0]);

    h.observe(&["a"], 0.05).unwrap();
    h.observe(&["a"], 0.5).unwrap();
    h.observe(&["a"], 3.0).unwrap();

    assert_eq!(h.sample_count(&["a"]), 3);
    assert!((h.sample_sum(&["a"]) - 3.55).abs() < 1e-9);

    let text = reg.render();
    assert!(text.contains("d_seconds_bucket{path=\"a\",le=\"0.1\"} 1\n"));
    assert!(text.contains("d_seconds_bucket{path=\"a\",le=\"1\"} 2\n"));
    assert!(text.contains("d_seconds_bucket{path=\"a\",le=\"+Inf\"} 3\n"));
    assert!(text.contains("d_seconds_count{path=\"a\"} 3\n"));
}

#[test]
fn render_is_sorted_and_escaped() {
    let reg = Registry::new();
    let z = reg.register_counter(Opts::new("z_total", "Last."), &["v"]).unwrap();
    let a = reg.register_counter(Opts::new("a_total", "First."), &[]).unwrap();

    z.inc(&["say \"hi\"\n"]).unwrap();
    a.add(&[], 7).unwrap();

    let text = reg.render();
    let a_pos = text.find("# HELP a_total First.").unwrap();
    let z_pos = text.find("# HELP z_total Last.").unwrap();
    assert!(a_pos < z_pos);
    assert!(text.contains("# TYPE a_total counter\na_total 7\n"));
    assert!(text.contains("z_total{v=\"say \\\"hi\\\"\\n\"} 1\n"));
}

#[test]
fn concurrent_updates_are_not_lost() {
    let reg = Registry::new();
    let c = reg.register_counter(Opts::new("hits_total", "x"), &["status"]).unwrap();
    let h = reg
        .register_histogram(Opts::new("lat_seconds", "x"), &["status"], &DEFAULT_BUCKETS)
        .unwrap();
    assert_eq!(h.bounds(), &DEFAULT_BUCKETS[..]);

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let c = Arc::clone(&c);
            let h = Arc::clone(&h);
            thread::spawn(move || {
                let status = if i % 2 == 0 { "200" } else { "404" };
                for _ in 0..1000 {
                    c.inc(&[status]).unwrap();
                    h.observe(&[status], 0.001).unwrap();
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(c.total(), 8000);
    assert_eq!(c.get(&["200"]), 4000);
    assert_eq!(h.total_count(), 8000);
    assert!((h.sample_sum(&["404"]) - 4.0).abs() < 1e-6);
}
