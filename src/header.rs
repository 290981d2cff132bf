//! Text form of a [`FrequencyMap`], written ahead of the payload:
//! `{97:2, 98:3, 256:1}`.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;

impl fmt::Display for FrequencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", symbol, count)?;
        }
        f.write_str("}")
    }
}

impl FromStr for FrequencyMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| malformed("missing braces"))?;

        let mut map = FrequencyMap::new();
        if inner.trim().is_empty() {
            return Ok(map);
        }

        for entry in inner.split(',') {
            let (key, value) = entry
                .trim()
                .split_once(':')
                .ok_or_else(|| malformed(format!("entry {:?} has no colon", entry.trim())))?;
            let code: u16 = key
                .trim()
                .parse()
                .map_err(|_| malformed(format!("bad key {:?}", key)))?;
            let count: u64 = value
                .trim()
                .parse()
                .map_err(|_| malformed(format!("bad count {:?}", value)))?;
            map.put(Symbol::try_from(code)?, count);
        }

        map.iter()
            .try_fold(0u64, |acc, (_, count)| acc.checked_add(count))
            .ok_or_else(|| malformed("counts add up past u64::MAX"))?;

        Ok(map)
    }
}

impl FrequencyMap {
    /// Reads a header from the front of `reader`, consuming up to and
    /// including the closing brace and nothing after it.
    pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_until(b'}', &mut buf)?;
        if buf.last() != Some(&b'}') {
            return Err(malformed("input ended before closing brace"));
        }

        std::str::from_utf8(&buf)
            .map_err(|_| malformed("header is not text"))?
            .parse()
    }
}

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedHeader(reason.into())
}
