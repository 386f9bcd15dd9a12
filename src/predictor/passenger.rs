use std::fmt;
use std::str::FromStr;

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use super::model::FEATURE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Female is 0, male is 1, matching the training data.
    pub fn code(&self) -> f64 {
        match self {
            Sex::Female => 0.0,
            Sex::Male => 1.0,
        }
    }
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => bail!("unknown sex {:?}, expected \"male\" or \"female\"", other),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Male => "male",
            Sex::Female => "female",
        })
    }
}

/// Port of embarkation: Cherbourg, Queenstown or Southampton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Port {
    C,
    Q,
    S,
}

impl Port {
    pub fn code(&self) -> f64 {
        match self {
            Port::C => 0.0,
            Port::Q => 1.0,
            Port::S => 2.0,
        }
    }
}

impl FromStr for Port {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "C" => Ok(Port::C),
            "Q" => Ok(Port::Q),
            "S" => Ok(Port::S),
            other => bail!("unknown port {:?}, expected one of C, Q, S", other),
        }
    }
}

/// One passenger as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    /// Ticket class, 1 to 3
    pub pclass: u8,
    pub sex: Sex,
    /// Age in years, 1 to 80
    pub age: u8,
    /// Siblings and spouses aboard, 0 to 8
    pub sibsp: u8,
    /// Parents and children aboard, 0 to 6
    pub parch: u8,
    /// Fare paid, 0.0 to 500.0
    pub fare: f64,
    pub embarked: Port,
}

impl Passenger {
    pub fn validate(&self) -> Result<()> {
        ensure!((1..=3).contains(&self.pclass), "passenger class must be 1-3, got {}", self.pclass);
        ensure!((1..=80).contains(&self.age), "age must be 1-80, got {}", self.age);
        ensure!(self.sibsp <= 8, "siblings/spouses aboard must be 0-8, got {}", self.sibsp);
        ensure!(self.parch <= 6, "parents/children aboard must be 0-6, got {}", self.parch);
        ensure!(
            (0.0..=500.0).contains(&self.fare),
            "fare must be 0.0-500.0, got {}",
            self.fare
        );
        Ok(())
    }

    /// `[pclass, sex, age, sibsp, parch, fare, embarked]`
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pclass as f64,
            self.sex.code(),
            self.age as f64,
            self.sibsp as f64,
            self.parch as f64,
            self.fare,
            self.embarked.code(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger {
            pclass: 1,
            sex: Sex::Female,
            age: 25,
            sibsp: 0,
            parch: 0,
            fare: 50.0,
            embarked: Port::S,
        }
    }

    #[test]
    fn test_feature_encoding() {
        assert_eq!(passenger().features(), [1.0, 0.0, 25.0, 0.0, 0.0, 50.0, 2.0]);

        let male = Passenger { sex: Sex::Male, embarked: Port::C, pclass: 3, ..passenger() };
        assert_eq!(male.features(), [3.0, 1.0, 25.0, 0.0, 0.0, 50.0, 0.0]);
    }

    #[test]
    fn test_parse_categoricals() {
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());

        assert_eq!("q".parse::<Port>().unwrap(), Port::Q);
        assert_eq!("S".parse::<Port>().unwrap(), Port::S);
        assert!("X".parse::<Port>().is_err());
    }

    #[test]
    fn test_valid_passenger() {
        assert!(passenger().validate().is_ok());

        let edges = Passenger { pclass: 3, age: 80, sibsp: 8, parch: 6, fare: 500.0, ..passenger() };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        assert!(Passenger { pclass: 0, ..passenger() }.validate().is_err());
        assert!(Passenger { pclass: 4, ..passenger() }.validate().is_err());
        assert!(Passenger { age: 0, ..passenger() }.validate().is_err());
        assert!(Passenger { age: 81, ..passenger() }.validate().is_err());
        assert!(Passenger { sibsp: 9, ..passenger() }.validate().is_err());
        assert!(Passenger { parch: 7, ..passenger() }.validate().is_err());
        assert!(Passenger { fare: -1.0, ..passenger() }.validate().is_err());
        assert!(Passenger { fare: 500.5, ..passenger() }.validate().is_err());
        assert!(Passenger { fare: f64::NAN, ..passenger() }.validate().is_err());
    }
}
