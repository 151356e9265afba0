use reeltime::{CompositionDef, Evaluator, FrameContent, FrameIndex};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/simple_timeline.json");
    let comp = CompositionDef::from_json_str(s)?.build()?;

    for f in [0u64, 10, 32, 39, 40, 75, 80, 105, 109] {
        let state = Evaluator::eval_frame(&comp, FrameIndex(f))?;
        let what = match &state.content {
            FrameContent::Scene { scene } => format!("{} @ {}", scene.id, scene.local_frame),
            FrameContent::Transition {
                transition,
                outgoing,
                incoming,
            } => format!(
                "{} {} -> {} ({:.2})",
                transition.presentation.name(),
                outgoing.id,
                incoming.id,
                transition.progress
            ),
            FrameContent::Blank => "blank".to_string(),
        };
        println!("frame {f}: {what}");
    }

    Ok(())
}
