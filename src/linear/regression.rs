//! Ordinary least squares fitting and the serialisable predictors it yields.

use core::fmt::Debug;
use std::ops::Range;

use anyhow::bail;
use linregress::fit_low_level_regression_model;
use serde::{Deserialize, Serialize};
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter};

use crate::linear::Matrix;

/// Maps a strongly typed column ordinal onto its index in a data row.
pub trait AsIndex {
    fn as_index(&self) -> usize;
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Display)]
pub enum Regressor<O: AsIndex> {
    Ordinal(O),
    Intercept,
    ZeroIntercept,
}
impl<O: AsIndex> Regressor<O> {
    pub fn resolve(&self, input: &[f64]) -> f64 {
        match self {
            Regressor::Ordinal(ordinal) => input[ordinal.as_index()],
            Regressor::Intercept => 1.,
            Regressor::ZeroIntercept => 0.,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Regressor::Intercept | Regressor::ZeroIntercept)
    }
}

/// A fitted linear predictor: the model artifact persisted alongside the team
/// mappings and consulted at serving time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictor<O: AsIndex> {
    pub regressors: Vec<Regressor<O>>,
    pub coefficients: Vec<f64>,
}
impl<O: AsIndex> Predictor<O> {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validate_regressors(&self.regressors)?;
        if self.regressors.len() != self.coefficients.len() {
            bail!("exactly one coefficient must be specified for each regressor");
        }
        Ok(())
    }

    pub fn predict(&self, input: &[f64]) -> f64 {
        self.regressors
            .iter()
            .enumerate()
            .map(|(regressor_index, regressor)| {
                let coefficient = self.coefficients[regressor_index];
                coefficient * regressor.resolve(input)
            })
            .sum()
    }
}

pub(crate) fn validate_regressors<O: AsIndex>(
    regressors: &[Regressor<O>],
) -> Result<(), anyhow::Error> {
    if regressors.len() < 2 {
        bail!("at least two regressors must be present");
    }
    let constants = regressors
        .iter()
        .filter(|regressor| regressor.is_constant())
        .count();
    if constants != 1 {
        bail!(
            "must specify exactly one {} or {} regressor",
            Regressor::<DummyOrdinal>::Intercept,
            Regressor::<DummyOrdinal>::ZeroIntercept
        );
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel<O: AsIndex> {
    pub response: O,
    pub predictor: Predictor<O>,
    pub std_errors: Vec<f64>,
    pub p_values: Vec<f64>,
    pub r_squared: f64,
    pub r_squared_adj: f64,
}
impl<O: AsIndex> RegressionModel<O> {
    pub fn fit(
        response: O,
        regressors: Vec<Regressor<O>>,
        data: &Matrix,
    ) -> Result<Self, anyhow::Error> {
        if data.cols() < 2 {
            bail!("insufficient number of columns in the data");
        }
        validate_regressors(&regressors)?;

        let mut subset = Matrix::allocate(data.rows(), 1 + regressors.len());
        for (row_index, row_data) in data.into_iter().enumerate() {
            subset[(row_index, 0)] = row_data[response.as_index()];
            for (regressor_index, regressor) in regressors.iter().enumerate() {
                subset[(row_index, 1 + regressor_index)] = regressor.resolve(row_data);
            }
        }

        let model = fit_low_level_regression_model(subset.flatten(), subset.rows(), subset.cols())?;
        let coefficients = model.parameters().to_vec();
        let std_errors = model.se().to_vec();
        let p_values = model.p_values().to_vec();
        let r_squared = model.rsquared();
        let r_squared_adj = model.rsquared_adj();
        Ok(RegressionModel {
            response,
            predictor: Predictor {
                regressors,
                coefficients,
            },
            std_errors,
            p_values,
            r_squared,
            r_squared_adj,
        })
    }

    pub fn tabulate(&self) -> Table
    where
        O: Debug,
    {
        let mut table = Table::default()
            .with_cols(vec![
                Col::new(Styles::default()),
                Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(11)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(5))),
            ])
            .with_row(Row::new(
                Styles::default().with(Header(true)),
                vec![
                    "Regressor".into(),
                    "Coefficient".into(),
                    "Std. error".into(),
                    "P-value".into(),
                    "".into(),
                ],
            ));
        for (regressor_index, regressor) in self.predictor.regressors.iter().enumerate() {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    format!("{:?}", regressor).into(),
                    format!("{:.8}", self.predictor.coefficients[regressor_index]).into(),
                    format!("{:.6}", self.std_errors[regressor_index]).into(),
                    format!("{:.6}", self.p_values[regressor_index]).into(),
                    Significance::lookup(self.p_values[regressor_index])
                        .label()
                        .into(),
                ],
            ));
        }

        table
    }
}

#[derive(Debug, Clone, PartialEq, EnumCount, EnumIter)]
pub enum Significance {
    A,
    B,
    C,
    D,
    E,
}
impl Significance {
    pub fn label(&self) -> &'static str {
        match self {
            Significance::A => "***",
            Significance::B => "**",
            Significance::C => "*",
            Significance::D => ".",
            Significance::E => "",
        }
    }

    pub fn range(&self) -> Range<f64> {
        match self {
            Significance::A => 0.0..0.001,
            Significance::B => 0.001..0.01,
            Significance::C => 0.01..0.05,
            Significance::D => 0.05..0.1,
            Significance::E => 0.1..1.0 + f64::EPSILON,
        }
    }

    pub fn lookup(p_value: f64) -> Self {
        for sig in Self::iter() {
            if sig.range().contains(&p_value) {
                return sig;
            }
        }
        unreachable!()
    }
}

struct DummyOrdinal;
impl AsIndex for DummyOrdinal {
    fn as_index(&self) -> usize {
        0
    }
}
