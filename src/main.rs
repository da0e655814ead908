//! nrsolve - Newton-Raphson root finder
//!
//! Solves one of the built-in test systems and prints the result.
//!
//! # Usage
//!
//! ```bash
//! nrsolve circle-line --jacobian complex-step --trajectory
//! nrsolve sqrt2 --preset successive-difference --x0 3
//! nrsolve exp --max-iterations 50 --verbose
//! ```

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use num_complex::Complex64;
use nrsolve::{
    error::{NewtonError, Result},
    problems::Problem,
    ComplexStep, FiniteDifference, NewtonRaphson, Solution, SolverConfig,
};

/// Newton-Raphson root finder for built-in test systems
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// System to solve
    #[arg(value_enum, value_name = "PROBLEM")]
    problem: Problem,

    /// Configuration preset
    #[arg(short, long, value_enum, default_value_t = Preset::StepNorm)]
    preset: Preset,

    /// Convergence tolerance (overrides the preset)
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Iteration cap (overrides the preset)
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// Source of the Jacobian
    #[arg(short, long, value_enum, default_value_t = JacobianKind::Analytic)]
    jacobian: JacobianKind,

    /// Initial guess, comma separated (defaults to the problem's own)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    x0: Option<Vec<f64>>,

    /// Print every estimate from the initial guess to the root
    #[arg(long)]
    trajectory: bool,

    /// Suppress the non-convergence warning
    #[arg(short, long)]
    quiet: bool,

    /// Log every iteration
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Step norm, tolerance 1e-10, 200 iterations
    StepNorm,
    /// Successive difference, tolerance 1e-12, 1,000,000 iterations
    SuccessiveDifference,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum JacobianKind {
    /// Closed-form Jacobian
    Analytic,
    /// Forward differences
    Forward,
    /// Central differences
    Central,
    /// Complex-step differentiation
    ComplexStep,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level(&args))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Build the configuration
    let mut config = match args.preset {
        Preset::StepNorm => SolverConfig::step_norm(),
        Preset::SuccessiveDifference => SolverConfig::successive_difference(),
    };
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    config = config
        .with_trajectory(args.trajectory)
        .with_warnings(!args.quiet);

    let problem = args.problem;
    let x0 = args.x0.unwrap_or_else(|| problem.initial_guess());
    if x0.len() != problem.dim() {
        return Err(NewtonError::dimension_mismatch(format!(
            "initial guess has length {}, {:?} expects {}",
            x0.len(),
            problem,
            problem.dim()
        )));
    }

    // Solve
    let mut solver = NewtonRaphson::with_config(config);
    let residual = |x: &[f64]| problem.residual(x);
    let solution = match args.jacobian {
        JacobianKind::Analytic => solver.solve(residual, |x: &[f64]| problem.jacobian(x), &x0)?,
        JacobianKind::Forward => solver.solve(residual, FiniteDifference::forward(residual), &x0)?,
        JacobianKind::Central => solver.solve_numeric(residual, &x0)?,
        JacobianKind::ComplexStep => {
            let jacobian = ComplexStep::new(|z: &[Complex64]| problem.residual_complex(z));
            solver.solve(residual, jacobian, &x0)?
        }
    };

    print_solution(&solution);

    Ok(())
}

/// Warnings by default, every iteration with `--verbose`.
fn log_level(args: &Args) -> LevelFilter {
    if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn print_solution(solution: &Solution) {
    println!("termination: {}", solution.termination);
    println!("iterations:  {}", solution.iterations);
    if let Some(step_norm) = solution.step_norm {
        println!("last step:   {:.3e}", step_norm);
    }
    println!("root:        {:?}", solution.root);

    if let Some(trajectory) = &solution.trajectory {
        println!("trajectory:");
        for (k, x) in trajectory.iter().enumerate() {
            println!("  {:>6}  {:?}", k, x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["nrsolve", "exp"]).unwrap();
        assert_eq!(log_level(&args), LevelFilter::Warn);

        let args = Args::try_parse_from(["nrsolve", "exp", "--verbose"]).unwrap();
        assert_eq!(log_level(&args), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "nrsolve",
            "circle-line",
            "--preset",
            "successive-difference",
            "--jacobian",
            "complex-step",
            "--x0",
            "-1.5,2",
            "--quiet",
        ])
        .unwrap();

        assert_eq!(args.problem, Problem::CircleLine);
        assert!(matches!(args.preset, Preset::SuccessiveDifference));
        assert!(matches!(args.jacobian, JacobianKind::ComplexStep));
        assert_eq!(args.x0, Some(vec![-1.5, 2.0]));
        assert!(args.quiet);
        assert!(!args.verbose);
    }
}
