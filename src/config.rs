//! 사용자 정의 물리량과 단위를 담는 TOML 설정.
//!
//! ```toml
//! [[quantities]]
//! name = "Luminance"
//! dimensions = "cd/m2"
//!
//! [[units]]
//! quantity = "Luminance"
//! id = "nt"
//! name = "nit"
//!
//! [[units]]
//! quantity = "Length"
//! id = "fur"
//! name = "furlong"
//! base = "m"
//! factor = 201.168
//! unit_system = "imperial"
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::Error as UnitsError;
use crate::prefix::SiPrefixes;
use crate::quantity::{Quantities, Quantity};
use crate::scale::Scale;
use crate::unit::{AnyUnit, UnitBuilder, UnitSystem};

/// 설정 오류
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("알 수 없는 물리량: {0}")]
    UnknownQuantity(String),
    #[error("물리량 {quantity}에 기준 단위 '{base}'가 없음")]
    UnknownBase { quantity: String, base: String },
    #[error("'{id}' 정의 오류: {source}")]
    Definition {
        id: String,
        #[source]
        source: UnitsError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quantities: Vec<QuantityDefinition>,
    #[serde(default)]
    pub units: Vec<UnitDefinition>,
}

/// 새 물리량. 차원은 `kgm2/s2` 같은 SI 차원 문자열이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityDefinition {
    pub name: String,
    pub dimensions: String,
}

/// 기존 물리량에 추가할 단위.
///
/// `base`를 비우면 물리량의 표준 단위에서 파생한다. 물리량에 단위가 아직 없으면
/// 이 단위가 기준 단위가 되며 `factor`와 `offset`은 무시한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub quantity: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbreviations: Vec<String>,
    #[serde(default)]
    pub display_abbreviation: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub prefixes: SiPrefixes,
    #[serde(default = "default_prefix_power")]
    pub prefix_power: i32,
}

fn default_factor() -> f64 {
    1.0
}

fn default_prefix_power() -> i32 {
    1
}

impl Config {
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// 정의된 물리량과 단위를 등록하고 새로 만든 단위를 돌려준다.
    ///
    /// 단위는 적힌 순서대로 등록되므로 앞에서 정의한 단위를 `base`로 쓸 수 있다.
    pub fn register(&self) -> Result<Vec<AnyUnit>, ConfigError> {
        let mut local: HashMap<&str, Quantity> = HashMap::new();
        for def in &self.quantities {
            let quantity = Quantity::from_si_string(def.name.as_str(), &def.dimensions).map_err(
                |err| ConfigError::Definition {
                    id: def.name.clone(),
                    source: err.into(),
                },
            )?;
            local.insert(def.name.as_str(), quantity);
        }

        let mut registered = Vec::with_capacity(self.units.len());
        for def in &self.units {
            let quantity = match local.get(def.quantity.as_str()) {
                Some(quantity) => quantity.clone(),
                None => Quantities::by_name(&def.quantity)
                    .ok_or_else(|| ConfigError::UnknownQuantity(def.quantity.clone()))?,
            };
            let unit = def.build(&quantity)?;
            debug!(quantity = quantity.name(), unit = unit.id(), "사용자 단위 등록");
            registered.push(unit);
        }
        if !registered.is_empty() {
            info!("사용자 단위 {}개 등록", registered.len());
        }
        Ok(registered)
    }
}

impl UnitDefinition {
    fn build(&self, quantity: &Quantity) -> Result<AnyUnit, ConfigError> {
        let invalid = |source: UnitsError| ConfigError::Definition {
            id: self.id.clone(),
            source,
        };
        let scale = if self.offset == 0.0 {
            Scale::linear(self.factor)
        } else {
            Scale::offset_linear(self.factor, self.offset)
        }
        .map_err(|err| invalid(err.into()))?;

        let builder = match (&self.base, quantity.standard_unit()) {
            (Some(base), _) => quantity
                .unit_by_id(base)
                .ok_or_else(|| ConfigError::UnknownBase {
                    quantity: quantity.name().to_string(),
                    base: base.clone(),
                })?
                .derive(scale)
                .map_err(|err| invalid(err.into()))?,
            (None, Some(standard)) => standard.derive(scale).map_err(|err| invalid(err.into()))?,
            (None, None) => UnitBuilder::new(quantity),
        };

        let mut builder = builder
            .id(self.id.as_str())
            .name(self.name.as_str())
            .unit_system(self.unit_system)
            .prefixes(self.prefixes, self.prefix_power);
        if !self.abbreviations.is_empty() {
            builder = builder.abbreviations(self.abbreviations.iter().cloned());
        }
        if let Some(display) = &self.display_abbreviation {
            builder = builder.display_abbreviation(display.as_str());
        }
        builder.build().map_err(invalid)
    }
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// 설정 파일을 읽는다. 파일이 없으면 빈 설정을 만들어 저장한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let config = Config::default();
            config.save(path)?;
            info!(path = %path.display(), "기본 설정 파일 생성");
            Ok(config)
        }
        Err(err) => Err(err.into()),
    }
}
