use std::time::Duration;

use progressist::{Animation, Error, Throttle, Update, Value};

mod common;
use common::{build, fixed_now, fixture, seconds_ago};

#[test]
fn test_default() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder);
    bar.set(37).unwrap();
    assert_eq!(out.take(), "\rBar: ==============                         37/100");
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                    50/100");
    bar.set(86).unwrap();
    assert_eq!(out.take(), "\rBar: ================================       86/100");
}

#[test]
fn test_update_by_one_step() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder);
    bar.set(49).unwrap();
    out.take();
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: ===================                    50/100");
}

#[test]
fn test_update_by_more_than_one_step() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder);
    bar.set(50).unwrap();
    out.take();
    bar.inc(7).unwrap();
    assert_eq!(out.take(), "\rBar: =====================                  57/100");
}

#[test]
fn test_explicit_done_ignores_step() {
    let (builder, _) = fixture();
    let (mut bar, _) = build(builder);
    bar.update(Update::new().step(7).done(50)).unwrap();
    assert_eq!(bar.done(), 50.0);
}

#[test]
fn test_iter() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder);
    for i in bar.iter(0..100) {
        if i == 50 {
            let printed = out.take();
            assert!(printed.ends_with("\rBar: ===================                    50/100"));
        }
    }
    let printed = out.take();
    assert!(printed.ends_with("\rBar: ===================================== 100/100\n"));
    assert_eq!(printed.matches('\n').count(), 1);
    assert!(bar.is_finished());
}

#[test]
fn test_iter_without_total_finishes() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .total(0)
            .animation(Animation::Spinner)
            .template("Spinner: {animation} {done}"),
    );
    let items: Vec<_> = bar.iter(["a", "b", "c"]).collect();
    assert_eq!(items, ["a", "b", "c"]);
    assert_eq!(
        out.take(),
        "\rSpinner: - 1\rSpinner: \\ 2\rSpinner: | 3\n"
    );
}

#[test]
fn test_oversized_precision_is_an_error() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{animation} {avg:.70000}"));
    match bar.set(5) {
        Err(Error::Format { field, .. }) => assert_eq!(field, "avg"),
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(out.take(), "");
}

#[test]
fn test_iter_keeps_render_error() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{prefix:B} {animation}"));
    let mut items = bar.iter(0..3);
    let count = (&mut items).count();
    assert_eq!(count, 3);
    assert!(matches!(items.error(), Some(Error::Format { .. })));
    assert_eq!(out.take(), "");
}

#[test]
fn test_custom_done_char() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.done_char('#'));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ###################                    50/100");
}

#[test]
fn test_custom_remain_char() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.remain_char('-'));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================------------------- 50/100");
}

#[test]
fn test_percent() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{prefix} {animation} {percent}"));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                    50.00%");
    bar.set(78.2134).unwrap();
    assert_eq!(out.take(), "\rBar: =============================          78.21%");
}

#[test]
fn test_can_override_percent_formatting() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{prefix} {animation} {percent:.1%}"));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                     50.0%");
    bar.set(78.2134).unwrap();
    assert_eq!(out.take(), "\rBar: ==============================          78.2%");
}

#[test]
fn test_avg() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("\r{prefix} {animation} {avg}/s")
            .start(seconds_ago(25)),
    );
    bar.set(43).unwrap();
    assert_eq!(out.take(), "\rBar: ================                       0.58/s");
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                    0.50/s");
}

#[test]
fn test_can_override_avg_formatting() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("\r{prefix} {animation} {avg:.1f}/s")
            .start(seconds_ago(25)),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                     0.5/s");
}

#[test]
fn test_speed() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("\r{prefix} {animation} {speed} loop/s")
            .start(seconds_ago(25)),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ================                  2.00 loop/s");
    bar.set(89).unwrap();
    assert_eq!(out.take(), "\rBar: =============================     3.56 loop/s");
}

#[test]
fn test_can_override_speed_formatting() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("\r{prefix} {animation} {speed:.1f} loop/s")
            .start(seconds_ago(25)),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: =================                  2.0 loop/s");
}

#[test]
fn test_spinner() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.animation(Animation::Spinner));
    bar.render().unwrap();
    assert_eq!(out.take(), "\rBar: - 0/100");
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: \\ 1/100");
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: | 2/100");
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: / 3/100");
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: - 4/100");
}

#[test]
fn test_spinner_without_total() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .total(0)
            .animation(Animation::Spinner)
            .template("\rSpinner: {animation}"),
    );
    bar.render().unwrap();
    assert_eq!(out.take(), "\rSpinner: -");
    for expected in ["\\", "|", "/", "-"] {
        bar.tick().unwrap();
        assert_eq!(out.take(), format!("\rSpinner: {expected}"));
    }
    assert!(!bar.is_finished());
}

#[test]
fn test_custom_spinner_steps() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.steps(['#', '*']).animation(Animation::Spinner));
    bar.render().unwrap();
    assert_eq!(out.take(), "\rBar: # 0/100");
    bar.tick().unwrap();
    assert_eq!(out.take(), "\rBar: * 1/100");
}

#[test]
fn test_stream() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.steps(['⎻', '⎼']).animation(Animation::Stream));
    bar.inc(50).unwrap();
    assert_eq!(out.take(), format!("\rBar: {} 50/100", "⎻⎼".repeat(19)));
    bar.tick().unwrap();
    assert_eq!(out.take(), format!("\rBar: {} 51/100", "⎼⎻".repeat(19)));
}

#[test]
fn test_throttle() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.throttle(5u64));
    bar.set(37).unwrap();
    assert_eq!(out.take(), "\rBar: ==============                         37/100");
    bar.set(38).unwrap();
    assert_eq!(out.take(), "");
    bar.set(42).unwrap();
    assert_eq!(out.take(), "\rBar: ===============                        42/100");
    bar.set(99).unwrap();
    assert_eq!(out.take(), "\rBar: =====================================  99/100");
    bar.set(100).unwrap();
    assert_eq!(out.take(), "\rBar: ===================================== 100/100\n");
}

#[test]
fn test_throttled_spinner_follows_frames() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .throttle(2u64)
            .animation(Animation::Spinner)
            .template("{animation} {done}"),
    );
    let mut lines = vec![];
    for _ in 0..6 {
        bar.tick().unwrap();
        lines.push(out.take());
    }
    // the glyph advances with the frames written, not with the ticks
    assert_eq!(lines, ["", "\r- 2", "", "\r\\ 4", "", "\r| 6"]);
    assert_eq!(bar.prints(), 3);
}

#[test]
fn test_throttled_render_keeps_last_metrics() {
    let (builder, _) = fixture();
    let (mut bar, _) = build(builder.throttle(5u64));
    bar.set(2).unwrap();
    assert_eq!(bar.done(), 2.0);
    assert_eq!(bar.fraction(), 0.0);
    assert_eq!(bar.prints(), 0);
}

#[test]
fn test_throttle_by_fraction() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.throttle(Throttle::fraction(0.1).unwrap()));
    bar.set(5).unwrap();
    assert_eq!(out.take(), "");
    bar.set(10).unwrap();
    assert!(out.take().ends_with(" 10/100"));
    bar.set(15).unwrap();
    assert_eq!(out.take(), "");
    bar.set(20).unwrap();
    assert!(out.take().ends_with(" 20/100"));
}

#[test]
fn test_throttle_by_interval() {
    let (builder, clock) = fixture();
    let (mut bar, out) = build(builder.throttle(Duration::from_secs(1)));
    bar.set(10).unwrap();
    assert!(out.take().ends_with(" 10/100"));
    clock.advance(Duration::from_millis(500));
    bar.set(20).unwrap();
    assert_eq!(out.take(), "");
    clock.advance(Duration::from_millis(600));
    bar.set(30).unwrap();
    assert!(out.take().ends_with(" 30/100"));
    clock.advance(Duration::from_millis(100));
    bar.set(100).unwrap();
    assert!(out.take().ends_with(" 100/100\n"));
}

#[test]
fn test_finish_without_total_renders_last_state() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .total(0)
            .throttle(5u64)
            .animation(Animation::Spinner)
            .template("Spinner: {animation} {done}"),
    );
    for _ in bar.iter(0..3) {}
    assert_eq!(out.take(), "\rSpinner: - 3\n");
    assert_eq!(bar.throttle(), Throttle::Off);
}

#[test]
fn test_finish_once() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.total(10));
    bar.set(10).unwrap();
    assert_eq!(out.take(), format!("\rBar: {} 10/10\n", "=".repeat(39)));
    bar.set(10).unwrap();
    assert_eq!(out.take(), "");
    bar.inc(5).unwrap();
    assert_eq!(out.take(), "");
    bar.finish().unwrap();
    assert_eq!(out.take(), "");

    // going back below 100% allows another completion
    bar.set(5).unwrap();
    assert!(!out.take().ends_with('\n'));
    bar.set(10).unwrap();
    assert!(out.take().ends_with("10/10\n"));
}

#[test]
fn test_finish_early_then_complete() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.total(10));
    bar.set(5).unwrap();
    bar.finish().unwrap();
    assert!(out.take().ends_with(" 5/10\n"));
    assert!(bar.is_finished());

    // reaching 100% later still draws the full bar and the outro
    bar.set(10).unwrap();
    assert_eq!(out.take(), format!("\rBar: {} 10/10\n", "=".repeat(39)));
    bar.set(10).unwrap();
    assert_eq!(out.take(), "");
    bar.finish().unwrap();
    assert_eq!(out.take(), "");
}

#[test]
fn test_custom_outro() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.outro("\n{done} items done\n"));
    bar.set(100).unwrap();
    assert!(out.take().ends_with(" 100/100\n100 items done\n"));
}

#[test]
fn test_eta() {
    let (builder, _) = fixture();
    // 3 seconds for half of the job
    let (mut bar, out) = build(
        builder
            .start(seconds_ago(3))
            .template("\r{prefix} {animation} {eta}"),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ==================                   01:02:06");
}

#[test]
fn test_more_than_24_hours_eta() {
    let (builder, _) = fixture();
    // 1 day and 1 second for half of the job
    let (mut bar, out) = build(
        builder
            .start(seconds_ago(60 * 60 * 24 + 1))
            .template("\r{prefix} {animation} {eta}"),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ============              2016-04-08 01:02:04");
}

#[test]
fn test_eta_with_time_format() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .start(seconds_ago(3))
            .template("{prefix} {animation} {eta:%H:%M}"),
    );
    bar.set(50).unwrap();
    assert!(out.take().ends_with(" 01:02"));
}

#[test]
fn test_tta() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .start(seconds_ago(3))
            .template("\r{prefix} {animation} {tta}"),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ==================                    0:00:03");
}

#[test]
fn test_tta_can_be_formatted_as_int() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .start(seconds_ago(3))
            .template("\r{prefix} {animation} | Remaining: {tta:d} seconds"),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===========            | Remaining: 3 seconds");
}

#[test]
fn test_elapsed() {
    let (builder, clock) = fixture();
    let (mut bar, out) = build(builder.template("{prefix} {elapsed}"));
    clock.advance(Duration::from_millis(90_500));
    bar.set(10).unwrap();
    assert_eq!(out.take(), "\rBar: 0:01:30");
    assert_eq!(bar.metrics().elapsed, 90);
}

#[test]
fn test_resume_supply() {
    let (_, clock) = fixture();
    let (mut bar, _) = build(
        progressist::progress("Download")
            .total(2000)
            .columns(50)
            .clock(clock.clone()),
    );
    bar.set(1000).unwrap();
    assert_eq!(bar.supply(), 1000.0);
    assert_eq!(bar.start(), Some(fixed_now()));

    clock.advance(Duration::from_secs(10));
    bar.set(1100).unwrap();
    // only the progress since the resume counts
    assert_eq!(bar.supply(), 1000.0);
    let metrics = bar.metrics();
    assert_eq!(metrics.addition, 100.0);
    assert_eq!(metrics.elapsed, 10);
    assert_eq!(metrics.avg, 0.1);
    assert_eq!(metrics.speed(), 10.0);
    assert_eq!(metrics.tta, 90);
}

#[test]
fn test_no_supply_with_start() {
    let (builder, _) = fixture();
    let (mut bar, _) = build(builder);
    bar.set(40).unwrap();
    assert_eq!(bar.supply(), 0.0);
    assert_eq!(bar.metrics().addition, 40.0);
}

#[test]
fn test_on_block() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.total(0).template("{done}/{total}"));
    bar.on_block(0, 300, 1000).unwrap();
    assert_eq!(out.take(), "\r0/1000");
    bar.on_block(2, 300, 1000).unwrap();
    assert_eq!(out.take(), "\r600/1000");
    // the last block is partial
    bar.on_block(4, 300, 1000).unwrap();
    assert_eq!(out.take(), "\r1000/1000\n");
    assert!(bar.is_finished());
}

#[test]
fn test_on_block_unknown_size() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{done}/{total}"));
    bar.on_block(3, 100, -1).unwrap();
    assert_eq!(out.take(), "\r300/0");
    assert_eq!(bar.total(), 0.0);
    assert!(!bar.is_finished());
}

#[test]
fn test_custom_field_and_props() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("{prefix} {animation} {file} {swap}")
            .field("swap", |_| Value::from("1 GiB")),
    );
    bar.update(Update::new().done(50).prop("file", "a.txt"))
        .unwrap();
    let line = out.take();
    assert!(line.starts_with("\rBar: ="));
    assert!(line.ends_with(" a.txt 1 GiB"));
    assert_eq!(line.chars().count(), 51);

    // props stay set
    bar.tick().unwrap();
    assert!(out.take().ends_with(" a.txt 1 GiB"));
}

#[test]
fn test_prop_overrides_builtin() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder);
    bar.update(Update::new().done(50).prop("prefix", "Other:"))
        .unwrap();
    assert!(out.take().starts_with("\rOther: ="));
}

#[test]
fn test_field_reads_frame() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .template("{half}")
            .field("half", |frame| Value::Count(frame.done / 2.0)),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\r25");
}

#[test]
fn test_unknown_field_is_empty() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.template("{prefix}{nope:>10} {animation} {done}/{total}"));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\rBar: ===================                    50/100");
}

#[test]
fn test_format_error() {
    let (builder, _) = fixture();
    let (mut bar, _) = build(builder.template("{prefix:B} {animation}"));
    let err = bar.set(1).unwrap_err();
    match err {
        Error::Format { field, .. } => assert_eq!(field, "prefix"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_config_errors() {
    let (builder, _) = fixture();
    assert!(matches!(
        builder.template("{prefix").build_with(Vec::new()),
        Err(Error::Config(_))
    ));
    let (builder, _) = fixture();
    assert!(matches!(
        builder.throttle(1.5).build_with(Vec::new()),
        Err(Error::Config(_))
    ));
    let (builder, _) = fixture();
    assert!(matches!(
        builder.steps([]).build_with(Vec::new()),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_invisible_chars() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .columns(20)
            .invisible_chars(11)
            .template("\r\x1b[34mC: {animation}\x1b[39m"),
    );
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\r\x1b[34mC: ========         \x1b[39m");
}

#[test]
fn test_no_room_left() {
    let (builder, _) = fixture();
    let prefix = "x".repeat(60);
    let (mut bar, out) = build(builder.prefix(prefix.clone()));
    bar.set(50).unwrap();
    assert_eq!(out.take(), format!("\r{prefix}  50/100"));
}

#[test]
fn test_slots_share_free_space() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(builder.columns(20).template("[{animation}|{animation}]"));
    bar.set(50).unwrap();
    assert_eq!(out.take(), "\r[====     |====    ]");
}

#[test]
fn test_custom_animation() {
    let (builder, _) = fixture();
    let reverse = Animation::custom(|frame, width| {
        progressist::anim::bar(frame.metrics.fraction, width, '=', ' ')
            .chars()
            .rev()
            .collect()
    });
    let (mut bar, out) = build(builder.animation(reverse));
    bar.set(50).unwrap();
    assert_eq!(
        out.take(),
        format!("\rBar: {}{} 50/100", " ".repeat(19), "=".repeat(19))
    );
}

#[test]
fn test_byte_sizes() {
    let (builder, _) = fixture();
    let (mut bar, out) = build(
        builder
            .total(197739688)
            .template("{done:B}/{total:B} {done:.2B}"),
    );
    bar.set(82944500).unwrap();
    assert_eq!(out.take(), "\r79.1 MiB/188.6 MiB 79.10 MiB");
}

#[test]
fn test_prints_count_frames() {
    let (builder, _) = fixture();
    let (mut bar, _) = build(builder.throttle(10u64));
    for _ in 0..25 {
        bar.tick().unwrap();
    }
    // 10 and 20
    assert_eq!(bar.prints(), 2);
    assert_eq!(bar.done(), 25.0);
}
