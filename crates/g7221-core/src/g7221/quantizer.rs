//! Category Quantization
//!
//! Forward and inverse quantization of one region's normalized coefficients
//! at a given category:
//! - categories 0-2: scalar dead-zone quantization, one signed bin per
//!   coefficient
//! - categories 3-6: vector quantization, one codebook index per group of
//!   `vector_dimension` coefficients
//! - category 7: nothing is coded, the region decodes to silence
//!
//! Both directions are pure functions of their inputs and the shared tables.

use crate::error::{CodecError, Result};
use crate::g7221::numeric::TableSet;
use crate::g7221::tables::codebook;
use crate::types::{Category, Coding, Symbol};

/// Largest vector dimension of any category
pub const MAX_VECTOR_DIMENSION: usize = 5;

fn check_vector_length(len: usize, category: Category) -> Result<()> {
    let dimension = category.vector_dimension();
    if len % dimension != 0 {
        return Err(CodecError::invalid_input(
            len - len % dimension,
            format!(
                "region length {} is not a multiple of the {} vector dimension {}",
                len, category, dimension
            ),
        ));
    }
    Ok(())
}

fn category_codebook(category: Category) -> Result<&'static [i8]> {
    codebook(category.index())
        .ok_or_else(|| CodecError::internal_error(format!("no codebook for {}", category)))
}

/// Quantize a region of normalized coefficients
///
/// # Errors
///
/// Returns an error if a vector category is given a region whose length is
/// not a multiple of its vector dimension.
pub fn quantize<T: TableSet>(
    tables: &T,
    values: &[T::Normalized],
    category: Category,
) -> Result<Vec<Symbol>> {
    match category.coding() {
        Coding::Scalar => Ok(values
            .iter()
            .map(|&x| tables.scalar_bin(x, category))
            .collect()),
        Coding::Vector => {
            check_vector_length(values.len(), category)?;
            let book = category_codebook(category)?;
            let dimension = category.vector_dimension();

            let symbols = values
                .chunks_exact(dimension)
                .map(|group| nearest_entry(tables, group, book, category))
                .collect();
            Ok(symbols)
        }
        Coding::Fallback => Ok(Vec::new()),
    }
}

/// Index of the codebook entry closest to `group`
///
/// Components inside the dead zone are zeroed first. Equal distances keep the
/// lower index.
fn nearest_entry<T: TableSet>(
    tables: &T,
    group: &[T::Normalized],
    book: &[i8],
    category: Category,
) -> Symbol {
    let dimension = group.len();
    let mut cleaned = [T::Normalized::default(); MAX_VECTOR_DIMENSION];
    for (slot, &x) in cleaned.iter_mut().zip(group) {
        if !tables.below_dead_zone(x, category) {
            *slot = x;
        }
    }
    let cleaned = &cleaned[..dimension];

    let mut best_index = 0;
    let mut best_distance = tables.distance(cleaned, &book[..dimension], category);
    for (index, entry) in book.chunks_exact(dimension).enumerate().skip(1) {
        let distance = tables.distance(cleaned, entry, category);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index as Symbol
}

/// Reconstruct a region of normalized coefficients from its symbols
///
/// `output.len()` is the region size. Out-of-range symbols are rejected,
/// never clamped.
///
/// # Errors
///
/// Returns [`CodecError::SymbolCountMismatch`] or
/// [`CodecError::MalformedSymbol`] (with region 0; callers coding a block use
/// [`CodecError::in_region`]).
pub fn dequantize<T: TableSet>(
    tables: &T,
    symbols: &[Symbol],
    category: Category,
    output: &mut [T::Normalized],
) -> Result<()> {
    if category.coding() == Coding::Vector {
        check_vector_length(output.len(), category)?;
    }

    let expected = category.expected_symbols(output.len());
    if symbols.len() != expected {
        return Err(CodecError::SymbolCountMismatch {
            region: 0,
            expected,
            actual: symbols.len(),
        });
    }

    let (min, max) = category.symbol_range();
    if let Some(&symbol) = symbols.iter().find(|&&s| s < min || s > max) {
        return Err(CodecError::MalformedSymbol {
            region: 0,
            category,
            symbol,
            min,
            max,
        });
    }

    match category.coding() {
        Coding::Scalar => {
            for (out, &bin) in output.iter_mut().zip(symbols) {
                *out = tables.reconstruct(bin, category);
            }
        }
        Coding::Vector => {
            let book = category_codebook(category)?;
            let dimension = category.vector_dimension();
            for (group, &index) in output.chunks_exact_mut(dimension).zip(symbols) {
                let entry = &book[index as usize * dimension..(index as usize + 1) * dimension];
                for (out, &bin) in group.iter_mut().zip(entry) {
                    *out = tables.reconstruct(Symbol::from(bin), category);
                }
            }
        }
        Coding::Fallback => output.fill(T::Normalized::default()),
    }

    Ok(())
}

/// Convenience wrapper around [`dequantize`] returning a new vector
pub fn dequantize_to_vec<T: TableSet>(
    tables: &T,
    symbols: &[Symbol],
    category: Category,
    len: usize,
) -> Result<Vec<T::Normalized>> {
    let mut output = vec![T::Normalized::default(); len];
    dequantize(tables, symbols, category, &mut output)?;
    Ok(output)
}
