//! Parallel evaluation of independent stack problems.
//!
//! A single stack evaluation is a strictly sequential fold, but separate
//! problems share nothing: each owns its own stack, wavevectors and running
//! reflection. A [`Batch`] therefore solves its problems in parallel with
//! rayon, keeping one result per problem in input order.
//!
//! Problems are listed explicitly, typically from the configuration file. A
//! failure in one problem is recorded against that problem only.

use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::{
    error::StackError,
    output,
    problem::Problem,
    result::Reflection,
    settings::Settings,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Stack;
    use num_complex::Complex64;

    fn real(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&n| Complex64::new(n, 0.0)).collect()
    }

    #[test]
    fn results_keep_input_order() {
        let problems: Vec<(String, Problem)> = (1..=16)
            .map(|i| {
                let n = 1.0 + 0.1 * i as f64;
                let stack = Stack::from_indices(&real(&[1.0, n]), &[]).unwrap();
                (format!("p{}", i), Problem::new(stack, 500.0, 0.0).unwrap())
            })
            .collect();

        let mut batch = Batch::from_problems(problems, Settings::default());
        batch.solve();

        assert_eq!(batch.results.len(), 16);
        for (i, result) in batch.results.iter().enumerate() {
            let n = 1.0 + 0.1 * (i + 1) as f64;
            let rs = result.as_ref().unwrap().rs.re;
            assert!((rs - (1.0 - n) / (1.0 + n)).abs() < 1e-14);
        }
        assert_eq!(batch.num_failed(), 0);
        assert!(batch.check().is_ok());
    }

    #[test]
    fn failure_is_local() {
        let good = Stack::from_indices(&real(&[1.0, 1.5]), &[]).unwrap();
        let bad = Stack::from_indices(
            &[Complex64::new(1.0, 0.0), Complex64::new(1.5, 5.0), Complex64::new(1.0, 0.0)],
            &[1.0e6],
        )
        .unwrap();
        let problems = vec![
            ("good".to_string(), Problem::new(good.clone(), 500.0, 0.0).unwrap()),
            ("bad".to_string(), Problem::new(bad, 500.0, 0.0).unwrap()),
            ("also good".to_string(), Problem::new(good, 500.0, 0.3).unwrap()),
        ];

        let mut batch = Batch::from_problems(problems, Settings::default());
        batch.solve();

        assert!(batch.results[0].is_ok());
        assert!(matches!(
            batch.results[1],
            Err(StackError::NumericInstability { layer: 1, .. })
        ));
        assert!(batch.results[2].is_ok());
        assert_eq!(batch.num_failed(), 1);
        assert!(batch.check().is_err());
    }
}

/// A set of named, independent problems and their results.
#[derive(Debug)]
pub struct Batch {
    pub names: Vec<String>,
    pub problems: Vec<Problem>,
    pub settings: Settings,
    /// One entry per problem, empty until [`Batch::solve`] runs.
    pub results: Vec<Result<Reflection, StackError>>,
}

impl Batch {
    /// Builds every problem described in the settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let problems = settings
            .problems
            .iter()
            .map(|p| {
                p.to_problem(settings.convention)
                    .map(|problem| (p.name.clone(), problem))
                    .with_context(|| format!("Invalid problem '{}'", p.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_problems(problems, settings))
    }

    pub fn from_problems(problems: Vec<(String, Problem)>, settings: Settings) -> Self {
        let (names, problems) = problems.into_iter().unzip();
        Self {
            names,
            problems,
            settings,
            results: Vec::new(),
        }
    }

    /// Solves all problems in parallel.
    pub fn solve(&mut self) {
        let start = Instant::now();
        info!("solving {} problem(s)", self.problems.len());

        let pb = ProgressBar::new(self.problems.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("stacks");

        self.results = self
            .problems
            .par_iter()
            .map(|problem| {
                let result = problem.solve();
                pb.inc(1);
                result
            })
            .collect();

        pb.finish_and_clear();
        info!("solved in {:.2?}", start.elapsed());
    }

    pub fn num_failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }

    /// Prints the results and writes them to the configured directory.
    pub fn writeup(&self) -> Result<()> {
        output::print_results(&self.names, &self.results);
        output::write_result(
            &self.names,
            &self.results,
            &self.settings.directory,
            self.settings.json,
        )
    }

    /// Fails if any problem failed.
    pub fn check(&self) -> Result<()> {
        match self.num_failed() {
            0 => Ok(()),
            n => Err(anyhow::anyhow!(
                "{} of {} problem(s) failed",
                n,
                self.results.len()
            )),
        }
    }
}
