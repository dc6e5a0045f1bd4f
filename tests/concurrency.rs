mod helpers;
use helpers::*;

use std::collections::BTreeSet;
use std::fs;

use tracelog::Logger;

const N_THREADS: usize = 4;
const N_LINES: usize = 50;

#[test]
fn shared_logger_numbers_every_line_once() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("mt.log");
    let (w, buf) = Mem::new();
    let lg = Logger::builder()
        .writer(w)
        .file(&p)
        .format("${counter} ${value}")
        .resolver(fixed_caller("t", "t.rs", 1))
        .build();

    std::thread::scope(|s| {
        for t in 0..N_THREADS {
            let lg = &lg;
            s.spawn(move || {
                for i in 0..N_LINES {
                    lg.log_info(&format!("T{t} #{i}")).unwrap();
                }
            });
        }
    });

    let console = lines_from(&buf);
    let file: Vec<String> = fs::read_to_string(&p)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(console.len(), N_THREADS * N_LINES);
    assert_eq!(console, file, "console and file see the same order");

    // counters are 0..N in emission order, with no duplicates
    for (n, l) in console.iter().enumerate() {
        assert!(l.starts_with(&format!("{n:04} ")), "{l}");
    }
    let msgs: BTreeSet<&str> = console.iter().map(|l| &l[5..]).collect();
    assert_eq!(msgs.len(), N_THREADS * N_LINES);
    assert_eq!(lg.counter(), (N_THREADS * N_LINES) as u64);
}
