//! Operation interpreter
//!
//! [`Evaluator`] borrows the file-system collaborator and turns operations
//! into result lists. It holds no state of its own, so a single evaluator
//! can serve a whole scan.

use ipm_fs::{FileSystem, NormalizedPath};
use regex::Regex;

use crate::{
    Error, FileAttribute, FileContext, FileOperation, FileRecord, MatchType, OpOutput, Operation,
    Param, Result, TestOperation, ValueOperation,
};

pub struct Evaluator<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Evaluator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Metadata and detected format of one entry.
    pub fn describe(&self, path: &NormalizedPath) -> Result<FileRecord> {
        let metadata = self.fs.metadata(path)?;
        let format = self.fs.detect_format(path)?;
        Ok(FileRecord::new(metadata, format))
    }

    pub fn eval(&self, op: &Operation, ctx: &FileContext) -> Result<OpOutput> {
        match op {
            Operation::File(op) => self.eval_file(op, ctx).map(OpOutput::Files),
            Operation::Test(op) => self.eval_test(op, ctx).map(OpOutput::Booleans),
            Operation::Value(op) => self.eval_value(op, ctx).map(OpOutput::Values),
        }
    }

    /// True when `op` yields only true values for `ctx`.
    pub fn holds(&self, op: &TestOperation, ctx: &FileContext) -> Result<bool> {
        Ok(self.eval_test(op, ctx)?.into_iter().all(|v| v))
    }

    pub fn eval_file(&self, op: &FileOperation, ctx: &FileContext) -> Result<Vec<NormalizedPath>> {
        // The input entry itself must be readable, whatever is selected.
        self.fs.metadata(&ctx.file)?;

        let candidates = match op {
            FileOperation::Current { .. } => vec![ctx.file.clone()],
            FileOperation::Parent { .. } => self.parent_of(ctx).into_iter().collect(),
            FileOperation::Children { .. } => self.fs.list_children(&ctx.file)?,
            FileOperation::Ancestors { .. } => {
                let mut ancestors = Vec::new();
                let mut current = ctx.clone();
                while let Some(parent) = self.parent_of(&current) {
                    current = ctx.for_file(parent.clone());
                    ancestors.push(parent);
                }
                ancestors
            }
        };

        let filters = op.filters();
        if filters.is_empty() {
            return Ok(candidates);
        }

        let mut selected = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let entry_ctx = ctx.for_file(candidate.clone());
            let mut keep = true;
            for filter in filters {
                if !self.holds(filter, &entry_ctx)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                selected.push(candidate);
            }
        }
        tracing::trace!(op = op.name(), file = %ctx.file, count = selected.len(), "file operation");
        Ok(selected)
    }

    pub fn eval_test(&self, op: &TestOperation, ctx: &FileContext) -> Result<Vec<bool>> {
        match op {
            TestOperation::And { operands } => {
                let values = self.truth_values(operands, ctx)?;
                Ok(vec![values.iter().all(|v| *v)])
            }
            TestOperation::Or { operands } => {
                let values = self.truth_values(operands, ctx)?;
                Ok(vec![values.iter().any(|v| *v)])
            }
            TestOperation::Not { operands } => {
                let values = self.truth_values(operands, ctx)?;
                if values.is_empty() {
                    return Ok(vec![true]);
                }
                Ok(values.into_iter().map(|v| !v).collect())
            }
            TestOperation::Match {
                match_type,
                pattern,
                values,
            } => self.eval_match(match_type.as_ref(), pattern, values, ctx),
            TestOperation::Count { min, max, operands } => {
                let min = match min {
                    Some(param) => self.resolve_count(param, "min", ctx)?.unwrap_or(0),
                    None => 0,
                };
                let max = match max {
                    Some(param) => self.resolve_count(param, "max", ctx)?,
                    None => None,
                };
                let mut total = 0u64;
                for operand in operands {
                    total += self.eval(operand, ctx)?.len() as u64;
                }
                let within = total >= min && max.is_none_or(|max| total <= max);
                Ok(vec![within])
            }
        }
    }

    pub fn eval_value(&self, op: &ValueOperation, ctx: &FileContext) -> Result<Vec<String>> {
        match op {
            ValueOperation::Literal { value } => {
                Ok(self.resolve_param(value, ctx)?.into_iter().collect())
            }
            ValueOperation::SystemProperty { name } => {
                let name = self
                    .resolve_param(name, ctx)?
                    .ok_or(Error::MissingParameter {
                        operation: "system-property",
                        name: "name",
                    })?;
                Ok(system_property(&name).into_iter().collect())
            }
            ValueOperation::FileMetadata { attribute, files } => {
                let attribute = self
                    .resolve_param(attribute, ctx)?
                    .ok_or(Error::MissingParameter {
                        operation: "file-metadata",
                        name: "attribute",
                    })?;
                let attribute: FileAttribute =
                    attribute.parse().map_err(|message| Error::InvalidParameter {
                        name: "attribute",
                        message,
                    })?;

                let paths = if files.is_empty() {
                    vec![ctx.file.clone()]
                } else {
                    let mut paths = Vec::new();
                    for file_op in files {
                        paths.extend(self.eval_file(file_op, ctx)?);
                    }
                    paths
                };

                let mut values = Vec::with_capacity(paths.len());
                for path in &paths {
                    if let Some(value) = self.describe(path)?.attribute(attribute) {
                        values.push(value);
                    }
                }
                Ok(values)
            }
        }
    }

    /// Literal value, or the first value of the nested operation.
    pub fn resolve_param(&self, param: &Param, ctx: &FileContext) -> Result<Option<String>> {
        match param {
            Param::Literal(value) => Ok(Some(value.clone())),
            Param::Computed(op) => Ok(self.eval_value(op, ctx)?.into_iter().next()),
        }
    }

    fn parent_of(&self, ctx: &FileContext) -> Option<NormalizedPath> {
        if ctx.is_root() {
            return None;
        }
        ctx.file
            .parent()
            .filter(|parent| parent.starts_with(&ctx.root))
    }

    fn truth_values(&self, operands: &[TestOperation], ctx: &FileContext) -> Result<Vec<bool>> {
        let mut values = Vec::new();
        for operand in operands {
            values.extend(self.eval_test(operand, ctx)?);
        }
        Ok(values)
    }

    fn eval_match(
        &self,
        match_type: Option<&Param>,
        pattern: &Param,
        values: &[ValueOperation],
        ctx: &FileContext,
    ) -> Result<Vec<bool>> {
        let match_type = match match_type {
            Some(param) => match self.resolve_param(param, ctx)? {
                Some(raw) => raw.parse().map_err(|message| Error::InvalidParameter {
                    name: "match_type",
                    message,
                })?,
                None => MatchType::default(),
            },
            None => MatchType::default(),
        };
        let pattern = self
            .resolve_param(pattern, ctx)?
            .ok_or(Error::MissingParameter {
                operation: "match",
                name: "pattern",
            })?;

        let compared = if values.is_empty() {
            self.eval_value(&ValueOperation::metadata(FileAttribute::Name), ctx)?
        } else {
            let mut compared = Vec::new();
            for op in values {
                compared.extend(self.eval_value(op, ctx)?);
            }
            compared
        };
        if compared.is_empty() {
            return Ok(vec![false]);
        }

        match match_type {
            MatchType::Exact => Ok(compared.iter().map(|v| *v == pattern).collect()),
            MatchType::Regex => {
                let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    Error::InvalidRegex {
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
                Ok(compared.iter().map(|v| regex.is_match(v)).collect())
            }
        }
    }

    fn resolve_count(
        &self,
        param: &Param,
        name: &'static str,
        ctx: &FileContext,
    ) -> Result<Option<u64>> {
        match self.resolve_param(param, ctx)? {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| Error::InvalidParameter {
                    name,
                    message: format!("'{}' is not a count: {}", raw, e),
                }),
            None => Ok(None),
        }
    }
}

/// Well-known host properties, falling back to environment variables.
pub fn system_property(name: &str) -> Option<String> {
    match name {
        "os.name" => Some(std::env::consts::OS.to_string()),
        "os.arch" => Some(std::env::consts::ARCH.to_string()),
        "file.separator" => Some(std::path::MAIN_SEPARATOR.to_string()),
        "line.separator" => Some(if cfg!(windows) { "\r\n" } else { "\n" }.to_string()),
        "user.dir" => std::env::current_dir()
            .ok()
            .map(|dir| NormalizedPath::new(dir).to_string()),
        "user.home" => dirs::home_dir().map(|dir| NormalizedPath::new(dir).to_string()),
        other => std::env::var(other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_properties() {
        assert_eq!(system_property("os.name").as_deref(), Some(std::env::consts::OS));
        assert!(system_property("user.dir").is_some());
        assert_eq!(system_property("no.such.property.anywhere"), None);
    }
}
