#![deny(missing_docs)]

//! # Definition Converter
//!
//! Drives each endpoint definition through three ordered phases:
//!
//! 1. **pre-process**: assign the request/response component names,
//! 2. **register schemas**: add the enveloped payload schemas as components,
//! 3. **assemble**: build the operations and add the path entry.
//!
//! A failure aborts the definition; components already registered for it
//! are kept.

/// Path and operation assembly.
pub mod assembler;

/// Component naming and schema registration.
pub mod registrar;

use crate::definition::EndpointDefinition;
use crate::error::{AppError, AppResult};
use crate::naming::{ComponentNamer, RandomCodeNamer};
use crate::oas::document::SpecificationDocument;
use crate::oas::shapes;
use tracing::{debug, info_span};

/// Owns the document being built and the namer used for its components.
#[derive(Debug)]
pub struct DefinitionConverter<N: ComponentNamer = RandomCodeNamer> {
    document: SpecificationDocument,
    namer: N,
}

impl DefinitionConverter<RandomCodeNamer> {
    /// Creates a converter with random component names.
    pub fn new(document: SpecificationDocument) -> Self {
        Self::with_namer(document, RandomCodeNamer::new())
    }
}

impl<N: ComponentNamer> DefinitionConverter<N> {
    /// Creates a converter with an explicit namer.
    ///
    /// The shared message and error components are registered up front.
    pub fn with_namer(mut document: SpecificationDocument, namer: N) -> Self {
        document.register_component(shapes::MESSAGE_RESPONSE, shapes::message_response());
        document.register_component(
            shapes::ERROR_DETAILS_RESPONSE,
            shapes::error_details_response(),
        );
        Self { document, namer }
    }

    /// The document built so far.
    pub fn document(&self) -> &SpecificationDocument {
        &self.document
    }

    /// Consumes the converter, returning the document.
    pub fn into_document(self) -> SpecificationDocument {
        self.document
    }

    /// Assigns component names to `definition`.
    pub fn pre_process(&mut self, definition: &mut EndpointDefinition) -> AppResult<()> {
        registrar::pre_process(definition, &mut self.namer)
    }

    /// Registers the request/response components of a pre-processed definition.
    pub fn register_schemas(&mut self, definition: &EndpointDefinition) -> AppResult<()> {
        registrar::register_schemas(&mut self.document, definition)
    }

    /// Adds the path entry of a pre-processed definition.
    pub fn assemble(&mut self, definition: &mut EndpointDefinition) -> AppResult<()> {
        assembler::assemble(&mut self.document, definition)
    }

    /// Runs all three phases for one definition.
    pub fn process(&mut self, definition: &mut EndpointDefinition) -> AppResult<()> {
        let span = info_span!("process", url = %definition.url, role = %definition.rr_type);
        let _guard = span.enter();

        self.pre_process(definition)?;
        self.register_schemas(definition)?;
        self.assemble(definition)?;
        debug!("definition processed");
        Ok(())
    }

    /// Processes definitions in order, stopping at the first failure.
    pub fn process_all<'a, I>(&mut self, definitions: I) -> AppResult<usize>
    where
        I: IntoIterator<Item = &'a mut EndpointDefinition>,
    {
        let mut count = 0;
        for definition in definitions {
            self.process(definition).map_err(|e| match e {
                AppError::InvalidDefinition(msg) => {
                    AppError::InvalidDefinition(format!("{} ({})", msg, definition.url))
                }
                other => other,
            })?;
            count += 1;
        }
        Ok(count)
    }
}
