//! # 构型与 UID 编码
//!
//! 构型是一个定长数字串，每一位是某个格点的物种索引（0 起始）。
//! UID 是构型按物种数为基数的按位编码，低位在前：
//!
//! ```text
//! uid = Σ digit[i] · radix^i
//! ```
//!
//! generate 与 fit 共用同一套编码，基数由调用方给定。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `error.rs`

use crate::error::{JkUtilityError, Result};

/// 一个格点物种构型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    digits: Vec<u8>,
    text: String,
}

impl Configuration {
    /// 从数字串解析
    pub fn parse(text: &str) -> Result<Self> {
        let mut digits = Vec::with_capacity(text.len());
        for c in text.chars() {
            let d = c.to_digit(10).ok_or_else(|| JkUtilityError::ParseError {
                format: "configuration".to_string(),
                path: text.to_string(),
                reason: format!("'{}' is not a decimal digit", c),
            })?;
            digits.push(d as u8);
        }
        Ok(Configuration {
            digits,
            text: text.to_string(),
        })
    }

    /// 位数（= 格点数）
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// 各位物种索引（0 起始），低位在前
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// 原始数字串
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 最大物种索引
    pub fn max_digit(&self) -> u8 {
        self.digits.iter().copied().max().unwrap_or(0)
    }

    /// 按给定基数编码 UID，低位在前
    ///
    /// 任一位 >= radix 或累加溢出 u64 都是错误，
    /// 因此结果必然落在 [0, radix^len) 内。
    pub fn uid(&self, radix: usize) -> Result<u64> {
        let mut uid: u64 = 0;
        let mut weight: u64 = 1;
        for (i, &d) in self.digits.iter().enumerate() {
            if d as usize >= radix {
                return Err(JkUtilityError::SpeciesOutOfRange {
                    config: self.text.clone(),
                    digit: d,
                    species: radix,
                });
            }
            let term = weight
                .checked_mul(d as u64)
                .ok_or(JkUtilityError::UidOverflow {
                    radix,
                    digits: self.digits.len(),
                })?;
            uid = uid.checked_add(term).ok_or(JkUtilityError::UidOverflow {
                radix,
                digits: self.digits.len(),
            })?;
            // 最后一位之后不再需要权重，跳过可能溢出的乘法
            if i + 1 < self.digits.len() {
                weight =
                    weight
                        .checked_mul(radix as u64)
                        .ok_or(JkUtilityError::UidOverflow {
                            radix,
                            digits: self.digits.len(),
                        })?;
            }
        }
        Ok(uid)
    }
}

/// 已知相的命名表
///
/// (物种数, UID) -> 惯用名。未收录的 UID 返回通用标签。
pub fn phase_name(uid: u64, num_species: usize) -> String {
    match (num_species, uid) {
        (2, 59) => "CsCl (59)".to_string(),
        (2, 58) => "NaTl (58)".to_string(),
        (3, 1) => "IH (1)".to_string(),
        (3, 1601) => "FH: (1601)".to_string(),
        (4, 2296) => "QH: (2296)".to_string(),
        _ => format!("Unknown Species > {}", uid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_least_significant_first() {
        // 0110 以 2 为基数: 0·1 + 1·2 + 1·4 + 0·8 = 6
        let config = Configuration::parse("0110").unwrap();
        assert_eq!(config.uid(2).unwrap(), 6);
    }

    #[test]
    fn test_uid_radix_four() {
        // 321 以 4 为基数: 3·1 + 2·4 + 1·16 = 27
        let config = Configuration::parse("321").unwrap();
        assert_eq!(config.uid(4).unwrap(), 27);
    }

    #[test]
    fn test_uid_zero() {
        let config = Configuration::parse("0000").unwrap();
        assert_eq!(config.uid(2).unwrap(), 0);
    }

    #[test]
    fn test_uid_range_bound() {
        // 最大构型的 UID 是 radix^len - 1
        let config = Configuration::parse("1111").unwrap();
        assert_eq!(config.uid(2).unwrap(), 15);
    }

    #[test]
    fn test_uid_digit_out_of_range() {
        let config = Configuration::parse("012").unwrap();
        assert!(matches!(
            config.uid(2),
            Err(JkUtilityError::SpeciesOutOfRange { digit: 2, .. })
        ));
    }

    #[test]
    fn test_uid_overflow() {
        // 70 位的 9 串在基数 10 下超出 u64
        let text: String = std::iter::repeat('9').take(70).collect();
        let config = Configuration::parse(&text).unwrap();
        assert!(matches!(
            config.uid(10),
            Err(JkUtilityError::UidOverflow { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_digit() {
        assert!(Configuration::parse("01a0").is_err());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(59, 2), "CsCl (59)");
        assert_eq!(phase_name(58, 2), "NaTl (58)");
        assert_eq!(phase_name(1, 3), "IH (1)");
        assert_eq!(phase_name(1601, 3), "FH: (1601)");
        assert_eq!(phase_name(2296, 4), "QH: (2296)");
        assert_eq!(phase_name(7, 2), "Unknown Species > 7");
    }
}
