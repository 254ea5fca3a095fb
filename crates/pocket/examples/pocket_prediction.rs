//! Will the ball reach the pocket?
//!
//! This example demonstrates:
//! 1. A crude estimate from the first and last pairs of frames
//! 2. A least-squares fit over every frame
//! 3. Forward simulation of both estimates to compare with the closed form
//! 4. The uncertainty of the fitted resting position

use pocket::{
    ForwardSimulator, KinematicFit, MethodOutcome, analyze,
    constants::{FRAME_RATE, GRAVITY, MEASUREMENT_NOISE_STD, POCKET_POSITION},
    dataset::measured_roll,
};

fn print_outcome(name: &str, outcome: &MethodOutcome) {
    println!("{}:", name);
    println!("  Initial position:    {:.5} m", outcome.state.position);
    println!("  Initial velocity:    {:.5} m/s", outcome.state.velocity);
    println!("  Friction coefficient: {:.5}", outcome.state.friction);
    match outcome.closed_form {
        Some(rest) => println!("  Resting position:    {:.5} m (closed form)", rest),
        None => println!("  Resting position:    ball never stops (closed form)"),
    }
    match outcome.simulated {
        Some(rest) => println!("  Resting position:    {:.5} m (simulated)", rest),
        None => println!("  Resting position:    simulation failed"),
    }
    println!();
}

fn main() {
    println!("=== Will the ball reach the pocket? ===\n");

    let observations = match measured_roll() {
        Ok(obs) => obs,
        Err(e) => {
            eprintln!("Invalid dataset: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{} frames at {:.0} Hz, measurement noise {:.1} mm, g = {:.2} m/s²",
        observations.len(),
        FRAME_RATE,
        MEASUREMENT_NOISE_STD * 1000.0,
        GRAVITY
    );
    for obs in observations.iter() {
        println!("  t={:.3}s  s={:.4}m", obs.time, obs.position);
    }
    println!();

    let fit = KinematicFit::new();
    let sim = ForwardSimulator::new();
    let analysis = match analyze(&observations, &fit, &sim, POCKET_POSITION) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    print_outcome("Two-point estimate", &analysis.two_point);
    print_outcome("Least-squares fit", &analysis.least_squares);

    let report = &analysis.fit;
    println!("Fit quality:");
    println!("  RMS residual:     {:.3e} m", report.rms_residual);
    if let Some(chi2) = report.chi_square {
        println!(
            "  Chi-square:       {:.3} ({} degrees of freedom)",
            chi2, report.degrees_of_freedom
        );
    }
    println!("  Condition number: {:.3e}", report.condition_number);
    println!(
        "  Standard errors:  s0 = {:.2e}, u = {:.2e}, alpha = {:.2e}",
        report.standard_errors[0], report.standard_errors[1], report.standard_errors[2]
    );
    println!();

    match &analysis.prediction {
        Some(prediction) => {
            println!("Prediction (pocket at {:.3} m):", prediction.target);
            println!("  Time to rest:     {:.3} s", prediction.time_to_rest);
            match prediction.resting_std {
                Some(std) => println!(
                    "  Resting position: {:.4} ± {:.4} m",
                    prediction.resting_position, std
                ),
                None => println!("  Resting position: {:.4} m", prediction.resting_position),
            }
            if let Some(margin) = prediction.margin_sigmas {
                println!("  Margin:           {:+.3} σ", margin);
            }
            println!(
                "  Reaches pocket:   {}",
                if prediction.reaches_target { "yes" } else { "no" }
            );
        }
        None => println!("Prediction: ball never stops"),
    }

    match serde_json::to_string_pretty(&analysis) {
        Ok(json) => println!("\nAnalysis (JSON):\n{}", json),
        Err(e) => eprintln!("Failed to serialize analysis: {}", e),
    }
}
