use reeltime::{
    EvalThreading, FrameIndex, FrameRange, eval_range_with_stats, promo, promo_def,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let comp = promo()?;
    let layout = comp.timeline().layout();
    for (scene, range) in comp.timeline().scenes().iter().zip(&layout.scenes) {
        println!("{:<16} [{}, {})", scene.id(), range.start.0, range.end.0);
    }
    println!(
        "resolved {} of {} frames",
        layout.len_frames,
        comp.duration_frames()
    );

    let range = FrameRange::new(FrameIndex(0), FrameIndex(comp.duration_frames()))?;
    let threading = EvalThreading {
        parallel: true,
        ..EvalThreading::default()
    };
    let (_, stats) = eval_range_with_stats(&comp, range, &threading)?;
    println!(
        "{} frames, {} visually distinct",
        stats.frames_total, stats.frames_distinct
    );

    let json = promo_def()?.to_json_pretty()?;
    println!("definition: {} bytes of JSON", json.len());
    Ok(())
}
