//! Named parameter registry

use super::setter::Parameter;
use super::value::ParamValue;
use crate::backend::{Chooser, ParameterTarget};
use crate::error::{HypreError, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Mapping from parameter name to value and setter, for one hypre handle.
///
/// Entries are kept in key order, so [`apply_all`](Self::apply_all) visits
/// them in the same order on every run.
pub struct ParameterRegistry<H> {
    parameters: BTreeMap<String, Parameter<H>>,
    chooser: Chooser,
}

impl<H> Clone for ParameterRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            chooser: self.chooser,
        }
    }
}

impl<H> std::fmt::Debug for ParameterRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("chooser", &self.chooser)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl<H> ParameterRegistry<H> {
    /// Create an empty registry for the solver or the preconditioner handle
    pub fn new(chooser: Chooser) -> Self {
        Self {
            parameters: BTreeMap::new(),
            chooser,
        }
    }

    /// Handle this registry's parameters are applied to
    pub fn chooser(&self) -> Chooser {
        self.chooser
    }

    /// Register a new parameter.
    ///
    /// Fails with `DuplicateKey` if `name` is already registered; use
    /// [`set`](Self::set) to change an existing value.
    pub fn add(&mut self, name: impl Into<String>, parameter: Parameter<H>) -> Result<()> {
        match self.parameters.entry(name.into()) {
            Entry::Occupied(entry) => Err(HypreError::DuplicateKey {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                log::trace!("registering hypre parameter '{}'", entry.key());
                entry.insert(parameter);
                Ok(())
            }
        }
    }

    /// Insert or replace a parameter, for the built-in default sets.
    pub(crate) fn insert(&mut self, name: &str, parameter: Parameter<H>) {
        self.parameters.insert(name.to_string(), parameter);
    }

    /// Replace the value of an existing parameter, keeping its setter.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<()> {
        let parameter = self
            .parameters
            .get_mut(name)
            .ok_or_else(|| HypreError::UnknownKey {
                name: name.to_string(),
            })?;
        parameter.value = value.into();
        Ok(())
    }

    /// Remove a parameter, returning it.
    pub fn remove(&mut self, name: &str) -> Result<Parameter<H>> {
        self.parameters
            .remove(name)
            .ok_or_else(|| HypreError::UnknownKey {
                name: name.to_string(),
            })
    }

    /// Look up a parameter
    pub fn get(&self, name: &str) -> Option<&Parameter<H>> {
        self.parameters.get(name)
    }

    /// Look up a parameter value
    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name).map(|p| &p.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter names in application order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter<H>)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply every parameter to `target`, in key order.
    ///
    /// Each setter is invoked exactly once with the current value. The first
    /// failure (type mismatch or hypre error code) aborts the run.
    pub fn apply_all(&self, target: &mut dyn ParameterTarget<H>) -> Result<()> {
        self.apply_to(self.chooser, target)
    }

    /// Like [`apply_all`](Self::apply_all), but on the handle selected by
    /// `chooser` instead of the registry's own.
    ///
    /// Lets one BoomerAMG parameter set serve as either solver or preconditioner.
    pub fn apply_to(&self, chooser: Chooser, target: &mut dyn ParameterTarget<H>) -> Result<()> {
        log::debug!(
            "applying {} hypre parameters to {}",
            self.parameters.len(),
            chooser
        );

        for (name, parameter) in &self.parameters {
            log::trace!("  {} = {:?}", name, parameter.value);
            parameter.apply(name, chooser, target)?;
        }

        Ok(())
    }
}
