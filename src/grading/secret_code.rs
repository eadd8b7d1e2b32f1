//! 匿名码生成
//!
//! 调用方持有避让集合并在一批生成中复用，生成的码会写回集合。

use rand::Rng;
use std::collections::HashSet;

use crate::config::GradingConfig;
use crate::errors::{GradingError, Result};

pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

// 随机抽取的次数上限，之后改为从随机起点顺序扫描
const RANDOM_ATTEMPTS: usize = 64;

#[derive(Debug, Clone)]
pub struct SecretCodeGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl SecretCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
        }
    }

    pub fn from_config(config: &GradingConfig) -> Self {
        Self::new(config.secret_code_length)
    }

    /// 替换字母表，重复字符只保留一次
    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        let mut seen = HashSet::new();
        self.alphabet = alphabet.chars().filter(|c| seen.insert(*c)).collect();
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// 码空间大小，超出 u128 时返回 None
    pub fn capacity(&self) -> Option<u128> {
        let base = self.alphabet.len() as u128;
        (0..self.length).try_fold(1u128, |acc, _| acc.checked_mul(base))
    }

    fn is_valid(&self, code: &str) -> bool {
        code.chars().count() == self.length && code.chars().all(|c| self.alphabet.contains(&c))
    }

    fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }

    // 把序号按字母表进制展开成定长的码
    fn code_at(&self, mut index: u128) -> String {
        let base = self.alphabet.len() as u128;
        let mut chars = vec![self.alphabet[0]; self.length];
        for slot in chars.iter_mut().rev() {
            *slot = self.alphabet[(index % base) as usize];
            index /= base;
        }
        chars.into_iter().collect()
    }

    /// 生成一个不在 `avoiding` 中的码，并把它插入 `avoiding`
    pub fn generate(&self, avoiding: &mut HashSet<String>) -> Result<String> {
        if self.length == 0 || self.alphabet.is_empty() {
            return Err(GradingError::validation("匿名码长度与字母表不能为空"));
        }

        let capacity = self.capacity();
        let used = avoiding.iter().filter(|code| self.is_valid(code)).count() as u128;
        if let Some(capacity) = capacity
            && used >= capacity
        {
            return Err(GradingError::exhausted_code_space(format!(
                "长度为 {} 的匿名码已全部用完（共 {} 个）",
                self.length, capacity
            )));
        }

        let mut rng = rand::rng();
        for _ in 0..RANDOM_ATTEMPTS {
            let code = self.random_code(&mut rng);
            if avoiding.insert(code.clone()) {
                return Ok(code);
            }
        }

        // 码空间接近用满，顺序扫描保证终止
        let space = capacity.unwrap_or(u128::MAX);
        let start = rng.random_range(0..space);
        for offset in 0..space {
            let index = if offset < space - start {
                start + offset
            } else {
                offset - (space - start)
            };
            let code = self.code_at(index);
            if avoiding.insert(code.clone()) {
                return Ok(code);
            }
        }

        Err(GradingError::exhausted_code_space(format!(
            "长度为 {} 的匿名码已全部用完",
            self.length
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_has_configured_length_and_alphabet() {
        let generator = SecretCodeGenerator::new(6);
        let mut avoiding = HashSet::new();
        let code = generator.generate(&mut avoiding).unwrap();
        assert_eq!(code.chars().count(), 6);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(avoiding.contains(&code));
    }

    #[test]
    fn test_batch_codes_are_distinct() {
        let generator = SecretCodeGenerator::new(2).with_alphabet("ABC");
        let mut avoiding = HashSet::new();
        let codes: Vec<String> = (0..9)
            .map(|_| generator.generate(&mut avoiding).unwrap())
            .collect();
        let unique: HashSet<&String> = codes.iter().collect();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_exhausted_code_space() {
        let generator = SecretCodeGenerator::new(1).with_alphabet("AB");
        let mut avoiding = HashSet::new();
        let first = generator.generate(&mut avoiding).unwrap();
        let second = generator.generate(&mut avoiding).unwrap();
        assert_ne!(first, second);

        let err = generator.generate(&mut avoiding).unwrap_err();
        assert!(matches!(err, GradingError::ExhaustedCodeSpace(_)));
        assert_eq!(avoiding.len(), 2);
    }

    #[test]
    fn test_finds_last_free_code() {
        let generator = SecretCodeGenerator::new(2).with_alphabet("AB");
        let mut avoiding: HashSet<String> = ["AA", "AB", "BA"].iter().map(|s| s.to_string()).collect();
        assert_eq!(generator.generate(&mut avoiding).unwrap(), "BB");
    }

    #[test]
    fn test_foreign_entries_do_not_count_toward_exhaustion() {
        let generator = SecretCodeGenerator::new(1).with_alphabet("AB");
        let mut avoiding: HashSet<String> =
            ["A", "zz", "ABC"].iter().map(|s| s.to_string()).collect();
        assert_eq!(generator.generate(&mut avoiding).unwrap(), "B");
    }

    #[test]
    fn test_capacity() {
        assert_eq!(SecretCodeGenerator::new(4).capacity(), Some(62u128.pow(4)));
        assert_eq!(SecretCodeGenerator::new(40).capacity(), None);
    }
}
