//! Header and source text generation.
//!
//! The generated pair looks like this (class `BinaryData`, one file):
//!
//! ```text
//! // BinaryData.h
//! namespace BinaryData {
//!   extern const char*  logo_mem;
//!   const int           logo_size = 3;
//!
//!   extern const char* getFile(int i);
//!   extern const size_t getFileSize(int i);
//!   const int numFiles = 1;
//!   extern const char* getFileName(int i);
//!
//!   namespace Items {
//!     enum: int{
//!       logo
//!     };
//!   }
//! }
//!
//! // BinaryData.cpp
//! static const unsigned char temp1[] = {1,2,3,0,0};
//! const char* BinaryData::logo_mem = (const char*) temp1;
//!
//! static const char* temp_ptrs[] = { BinaryData::logo_mem };
//! static const size_t temp_sizes[] = { 3 };
//! static const char* temp_names[] = { "logo" };
//! ```
//!
//! The pointer, size and name tables and the `Items` enumeration are all
//! written from the same catalog iteration, so index `i` names the same
//! file everywhere. The accessors index the tables without bounds checks;
//! callers must pass `0 <= i < numFiles`. [`RegistryEmitter::checked_accessors`]
//! adds a `tryGetFile` that does check.

use crate::catalog::{ResourceCatalog, ResourceRecord};
use crate::encoder::{EncodedPayload, LineEnding};
use std::fmt::{Result, Write};

const BANNER: &str = "/* (Auto-generated binary data file). */";

/// Writes declarations, definitions and aggregate tables for a catalog
#[derive(Debug, Clone)]
pub struct RegistryEmitter {
    class_name: String,
    line_ending: LineEnding,
    checked_accessors: bool,
}

impl RegistryEmitter {
    /// Creates an emitter for the given namespace name
    pub fn new(class_name: impl Into<String>, line_ending: LineEnding) -> Self {
        Self {
            class_name: class_name.into(),
            line_ending,
            checked_accessors: false,
        }
    }

    /// Also emit the bounds-checked `tryGetFile` accessor
    pub fn checked_accessors(mut self, enabled: bool) -> Self {
        self.checked_accessors = enabled;
        self
    }

    fn nl(&self) -> &'static str {
        self.line_ending.as_str()
    }

    /// Writes the header banner and opens the namespace
    pub fn header_preamble(&self, out: &mut String) -> Result {
        let nl = self.nl();
        write!(out, "{BANNER}{nl}{nl}#pragma once{nl}{nl}namespace {} {{{nl}", self.class_name)
    }

    /// Writes the source banner and the header include
    pub fn source_preamble(&self, out: &mut String) -> Result {
        let nl = self.nl();
        write!(out, "{BANNER}{nl}{nl}#include \"{}.h\"{nl}{nl}", self.class_name)
    }

    /// Writes the `_mem` / `_size` declarations for one record
    pub fn declare(&self, out: &mut String, record: &ResourceRecord) -> Result {
        let nl = self.nl();
        let id = &record.identifier;
        write!(
            out,
            "  extern const char*  {id}_mem;{nl}  const int           {id}_size = {};{nl}{nl}",
            record.byte_size
        )
    }

    /// Writes the array literal and the `_mem` pointer definition for one record
    pub fn define(
        &self,
        out: &mut String,
        record: &ResourceRecord,
        payload: &EncodedPayload,
    ) -> Result {
        let nl = self.nl();
        out.push_str(&payload.literal);
        write!(
            out,
            "const char* {}::{}_mem = (const char*) {};{nl}{nl}",
            self.class_name,
            record.identifier,
            payload.symbol_name()
        )
    }

    /// Closes the header: accessor declarations, `numFiles` and the `Items` enum
    pub fn finish_header(&self, out: &mut String, catalog: &ResourceCatalog) -> Result {
        let nl = self.nl();

        write!(out, "  extern const char* getFile(int i);{nl}")?;
        write!(out, "  extern const size_t getFileSize(int i);{nl}")?;
        write!(out, "  const int numFiles = {};{nl}", catalog.len())?;
        write!(out, "  extern const char* getFileName(int i);{nl}{nl}")?;

        if self.checked_accessors {
            write!(
                out,
                "  extern bool tryGetFile(int i, const char*& data, size_t& size);{nl}{nl}"
            )?;
        }

        write!(out, "  namespace Items {{{nl}    enum: int{{{nl}")?;
        self.write_list(out, catalog, |out, r| write!(out, "      {}", r.identifier))?;
        write!(out, "{nl}    }};{nl}  }}{nl}{nl}}}{nl}")
    }

    /// Closes the source: the three tables and the accessor bodies
    pub fn finish_source(&self, out: &mut String, catalog: &ResourceCatalog) -> Result {
        let nl = self.nl();
        let class = &self.class_name;

        write!(out, "static const char* temp_ptrs[] = {{{nl}")?;
        self.write_list(out, catalog, |out, r| write!(out, "  {class}::{}_mem", r.identifier))?;
        write!(out, "{nl}}};{nl}{nl}")?;
        write!(out, "const char* {class}::getFile(int i) {{ return temp_ptrs[i]; }}{nl}{nl}")?;

        write!(out, "static const size_t temp_sizes[] = {{{nl}")?;
        self.write_list(out, catalog, |out, r| write!(out, "  {}", r.byte_size))?;
        write!(out, "{nl}}};{nl}{nl}")?;
        write!(
            out,
            "const size_t {class}::getFileSize(int i) {{ return temp_sizes[i]; }}{nl}{nl}"
        )?;

        write!(out, "static const char* temp_names[] = {{{nl}")?;
        self.write_list(out, catalog, |out, r| write!(out, "  \"{}\"", r.identifier))?;
        write!(out, "{nl}}};{nl}{nl}")?;
        write!(
            out,
            "const char* {class}::getFileName(int i) {{ return temp_names[i]; }}{nl}{nl}"
        )?;

        if self.checked_accessors {
            write!(
                out,
                "bool {class}::tryGetFile(int i, const char*& data, size_t& size){nl}\
                 {{{nl}\
                 \x20 if (i < 0 || i >= numFiles) return false;{nl}\
                 \x20 data = temp_ptrs[i];{nl}\
                 \x20 size = temp_sizes[i];{nl}\
                 \x20 return true;{nl}\
                 }}{nl}{nl}"
            )?;
        }

        Ok(())
    }

    /// Writes one entry per record in catalog order, separated by `,` + newline
    fn write_list<F>(&self, out: &mut String, catalog: &ResourceCatalog, mut entry: F) -> Result
    where
        F: FnMut(&mut String, &ResourceRecord) -> Result,
    {
        for (i, record) in catalog.iter().enumerate() {
            if i > 0 {
                write!(out, ",{}", self.nl())?;
            }
            entry(out, record)?;
        }
        Ok(())
    }
}
