//! Example: Walking forward with online replanning.
//!
//! This example demonstrates how to:
//! - Parse the interpolator configuration from TOML
//! - Plug a footstep planner into the trajectory generator
//! - Generate references from rest and replan at a merge point
//!
//! Run with: `cargo run --example walk_forward --features std`

use footstep_interpolator::{
    error::Result, parse_config, Foot, FootstepPlanner, FootstepSequence, GenerationMode,
    MeasuredFeet, MeasuredPose, StepPhase, Step, TrajectoryGenerator,
};

/// Planner placing one step every `step_time`, alternating feet.
struct Cadence {
    step_time: f64,
    step_length: f64,
    half_width: f64,
}

impl FootstepPlanner for Cadence {
    fn extend(
        &mut self,
        left: &mut FootstepSequence,
        right: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()> {
        if left.is_empty() {
            left.add_step(Step::new(0.0, self.half_width, 0.0, init_time))?;
        }
        if right.is_empty() {
            right.add_step(Step::new(0.0, -self.half_width, 0.0, init_time))?;
        }

        while let (Some(&l), Some(&r)) = (left.last_step(), right.last_step()) {
            let impact = (l.impact_time.max(r.impact_time) + self.step_time)
                .max(init_time + self.step_time);
            if impact > end_time {
                break;
            }
            if l.impact_time < r.impact_time {
                let x = r.position.x + self.step_length;
                left.add_step(Step::new(x, self.half_width, 0.0, impact))?;
            } else {
                let x = l.position.x + self.step_length;
                right.add_step(Step::new(x, -self.half_width, 0.0, impact))?;
            }
        }
        Ok(())
    }
}

fn phase_name(phase: StepPhase) -> &'static str {
    match phase {
        StepPhase::Stance => "stance",
        StepPhase::SwitchIn => "switch-in",
        StepPhase::SwitchOut => "switch-out",
        StepPhase::Swing => "swing",
    }
}

fn main() -> Result<()> {
    println!("=== Walk Forward Example ===\n");

    let toml_content = r#"
switch_ratio = 0.2
terminal_half_switch_time = 0.3
step_height = 0.03
swing_apex_ratio = 0.5

[pause]
max_step_time = 2.0
nominal_step_time = 0.8

[com]
nominal_height = 0.5
stance_delta = 0.01
"#;

    let config = parse_config(toml_content)?;
    println!("Switch ratio: {}", config.switch_ratio);
    println!("Step height: {} m\n", config.step_height);

    let planner = Cadence {
        step_time: 0.8,
        step_length: 0.12,
        half_width: 0.1,
    };
    let mut generator = TrajectoryGenerator::new(config, planner)?;

    // Fresh generation from rest
    let trajectory = generator
        .generate_from_scratch(0.0, 0.01, 4.0, GenerationMode::Weight)?
        .clone();
    println!("--- Fresh generation ---");
    println!(
        "Samples: {} ({} s to {} s)",
        trajectory.len(),
        trajectory.init_time,
        trajectory.end_time()
    );
    println!("Phase shifts: {:?}", trajectory.phase_shifts);
    println!("Merge points: {:?}", trajectory.merge_points);

    if let Some(weight) = trajectory.weight() {
        for i in (0..trajectory.len()).step_by(40) {
            let zmp = weight.global_zmp[i];
            println!(
                "  t={:5.2} left={:<10} right={:<10} weight_in_left={:.3} \
                 zmp=({:+.3}, {:+.3}) com={:.4}",
                trajectory.time_at(i),
                phase_name(trajectory.left_phases[i]),
                phase_name(trajectory.right_phases[i]),
                weight.weight_in_left[i],
                zmp.x,
                zmp.y,
                trajectory.com_height[i],
            );
        }
    }

    // Replan at the first merge point with a slightly displaced left foot
    let Some((merge, _)) = trajectory.next_merge_point(0) else {
        println!("\nNo merge point to replan from");
        return Ok(());
    };
    let present = *generator
        .left_steps()
        .first_step()
        .unwrap_or(&Step::new(0.0, 0.1, 0.0, 0.0));
    let measured = MeasuredPose::new(
        present.position.x + 0.01,
        present.position.y,
        present.angle + 0.02,
    );

    let replanned =
        generator.regenerate_from_merge_point(merge, 6.0, Some(MeasuredFeet::Left(measured)))?;
    println!("\n--- Replanned at sample {} ({} s) ---", merge, replanned.init_time);
    println!("Samples: {}", replanned.len());
    println!("Merge points: {:?}", replanned.merge_points);
    if let Some(weight) = replanned.weight() {
        println!(
            "Weight in left at splice: {:.4} (was {:.4})",
            weight.weight_in_left[0],
            trajectory.weight().map_or(f64::NAN, |w| w.weight_in_left[merge]),
        );
    }

    println!(
        "\nPlan: {} left steps, {} right steps",
        generator.left_steps().len(),
        generator.right_steps().len()
    );
    for foot in [Foot::Left, Foot::Right] {
        let steps = match foot {
            Foot::Left => generator.left_steps(),
            Foot::Right => generator.right_steps(),
        };
        for step in steps.steps() {
            println!(
                "  {}: ({:+.3}, {:+.3}) yaw={:+.3} at {:.2} s",
                foot, step.position.x, step.position.y, step.angle, step.impact_time
            );
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
