//! 명령줄 인터페이스.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::format::format_value;
use crate::parse::split_value_and_unit;
use crate::quantity::Quantities;

#[derive(Debug, Parser)]
#[command(name = "dimunits", version, about = "단위 환산과 SI 차원 계산")]
pub struct Cli {
    /// 사용자 물리량/단위 정의 파일
    #[arg(long, global = true, default_value = "dimunits.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 값을 다른 단위로 환산한다. 예: `convert "80 mm" --to in`
    Convert {
        /// 값과 단위 (`2.0km/h^2`, `80 mm`)
        value: String,
        #[arg(long)]
        to: String,
        /// 약어가 여러 물리량에 걸칠 때 물리량 이름
        #[arg(long)]
        quantity: Option<String>,
    },
    /// SI 차원 문자열을 해석하고 같은 차원의 물리량을 보여준다.
    Dims { dimensions: String },
    /// 물리량의 단위 목록
    Units {
        quantity: String,
        /// 접두어로 자동 생성된 단위도 표시
        #[arg(long)]
        all: bool,
    },
    /// 등록된 물리량 목록
    Quantities,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// 사용자 단위를 등록한 뒤 명령을 실행하고 결과를 출력한다.
pub fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    config.register()?;
    println!("{}", execute(&cli.command)?);
    Ok(())
}

/// 명령을 실행해 출력할 문자열을 만든다.
pub fn execute(command: &Command) -> Result<String, AppError> {
    match command {
        Command::Convert {
            value,
            to,
            quantity,
        } => {
            let (value, from) = split_value_and_unit(value)?;
            let (source, target) = match quantity {
                Some(quantity) => conversion::resolve_pair_in(quantity, from, to)?,
                None => conversion::resolve_pair(from, to)?,
            };
            let result = conversion::convert_units(value, &source, &target);
            Ok(format!(
                "{}{} = {}{} ({})",
                format_value(value),
                source.default_display_abbreviation(),
                format_value(result),
                target.default_display_abbreviation(),
                target.quantity()
            ))
        }
        Command::Dims { dimensions } => {
            let dimensions: SIDimensions = dimensions.parse()?;
            let names: Vec<String> = Quantities::quantities_for(dimensions)
                .iter()
                .map(|q| q.name().to_string())
                .collect();
            let names = if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            };
            Ok(format!(
                "{dimensions} ({}): {names}",
                dimensions.to_string_with(true, ".", "^")
            ))
        }
        Command::Units { quantity, all } => {
            let quantity = Quantities::by_name(quantity)
                .ok_or_else(|| ConversionError::UnknownQuantity(quantity.clone()))?;
            let standard = quantity.standard_unit();
            let lines: Vec<String> = quantity
                .units()
                .iter()
                .filter(|unit| *all || !unit.is_generated())
                .map(|unit| {
                    let marker = if standard.as_ref() == Some(unit) { "*" } else { " " };
                    format!(
                        "{marker} {:<10} {:<28} {}",
                        unit.id(),
                        unit.name(),
                        unit.abbreviations().join(", ")
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
        Command::Quantities => {
            let lines: Vec<String> = Quantities::all()
                .iter()
                .map(|q| format!("{:<22} {}", q.name(), q.dimensions()))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_command() {
        let cli = Cli::parse_from(["dimunits", "convert", "80 mm", "--to", "in"]);
        assert_eq!(cli.config, PathBuf::from("dimunits.toml"));
        let out = execute(&cli.command).unwrap();
        assert_eq!(out, "80.000mm = 3.150in (Length)");
    }

    #[test]
    fn dims_lists_energy_and_torque() {
        let out = execute(&Command::Dims {
            dimensions: "kg.m^2/s^2".to_string(),
        })
        .unwrap();
        assert!(out.starts_with("kgm2/s2 (kg.m^2/s^2): "));
        assert!(out.contains("Energy"));
        assert!(out.contains("Torque"));
    }

    #[test]
    fn units_hides_generated_by_default() {
        let short = execute(&Command::Units {
            quantity: "Length".to_string(),
            all: false,
        })
        .unwrap();
        let full = execute(&Command::Units {
            quantity: "Length".to_string(),
            all: true,
        })
        .unwrap();
        assert!(short.lines().count() < full.lines().count());
        assert!(short.lines().any(|line| line.starts_with("* m ")));
    }

    #[test]
    fn bad_value_reports_parse_error() {
        let err = execute(&Command::Convert {
            value: "abc".to_string(),
            to: "m".to_string(),
            quantity: None,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Unit(UnitError::Parse(_))));
    }
}
