//! Compile-only test to verify public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.
//!
//! Run with: cargo test -- api_surface

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// ============================================================================
// Engine
// ============================================================================

use relabel::adapter::{LanguageAdapter, PrimitiveAdapter, RenameEdit};
use relabel::buffer::{AppliedRename, OffsetTrackingBuffer};
use relabel::graph::{Component, ComponentKind, RenameGraph};
use relabel::mapping::RenameMapping;
use relabel::options::{RenameOptions, VerifyMode, DEFAULT_MAX_TEMP_ATTEMPTS, DEFAULT_TEMP_SENTINEL};
use relabel::orchestrator::{rename_batch, Orchestrator};
use relabel::plan::{plan_batch, BatchPlan, ExecutionPlan, PlanStep, StepKind, TempNamer};
use relabel::symbols::{locate_first, SymbolEntry, SymbolTable};

// ============================================================================
// Shared types
// ============================================================================

use relabel::error::{OutputErrorCode, RelabelError, RelabelResult};
use relabel::output::{
    emit_response, ErrorInfo, ErrorResponse, IdentifierInfo, IdentifiersResponse,
    RenameResponse, SCHEMA_VERSION,
};
use relabel::patch::{apply_span_renames, ContentHash, Span, SpanEditError, SpanRename};
use relabel::text::{byte_offset_to_position_str, spells_token_at};
use relabel::types::{EntryResult, IdentifierOccurrence, RenameReport, RenameStatus, RenameWarning};

// ============================================================================
// JavaScript front end
// ============================================================================

use relabel::js::ast::{Expression, Identifier, Program, Statement};
use relabel::js::error::{JsError, JsResult};
use relabel::js::lexer::{tokenize, Token, TokenKind};
use relabel::js::parser::parse_program;
use relabel::js::rename::{rename_edits, rename_symbol_at};
use relabel::js::scope::{Occurrence, Resolution, ScopeCollector, ScopeId, ScopeInfo, Symbol, SymbolId};
use relabel::js::visitor::{
    walk_program, BindingKind, IdentRole, IdentifierCollector, ScopeKind, VisitResult, Visitor,
};
use relabel::js::JsAdapter;

// ============================================================================
// CLI
// ============================================================================

use relabel::cli::{check_options, load_mapping, run_idents, run_rename};

#[test]
fn api_surface_compiles() {
    // This test exists only to ensure the imports above compile.
    // If you're seeing this test fail, the public API has regressed.
}

#[test]
fn adapter_is_usable_through_root_reexports() {
    let mapping = relabel::RenameMapping::from_pairs([("a", "b")]).unwrap();
    let report = relabel::rename_batch(
        &relabel::JsAdapter,
        "var a;",
        &mapping,
        relabel::RenameOptions::default(),
    )
    .unwrap();
    assert_eq!(report.text, "var b;");
    assert_eq!(report.status_of("a"), Some(relabel::RenameStatus::Renamed));
}
