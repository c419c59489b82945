// type_display.rs
//
// Human readable names for types and signatures, used in diagnostic context.

use tarn_identity::SymbolId;

use crate::symbols::{ParameterizedKey, SymbolTable};

impl SymbolTable {
    /// Friendly name of a type: `List of Integer`, `Dict of (Integer, String)`.
    pub fn friendly_name(&self, ty: SymbolId) -> String {
        let symbol = self.symbol(ty);
        match &symbol.synthesized.parameterized_from {
            Some(key) => self.friendly_key(key),
            None => self.name_of(ty).to_string(),
        }
    }

    /// Friendly name of a parameterisation, whether or not it exists yet.
    pub fn friendly_key(&self, key: &ParameterizedKey) -> String {
        let base = self.friendly_name(key.base);
        match key.args.as_slice() {
            [single] => format!("{} of {}", base, self.friendly_name(*single)),
            args => format!("{} of ({})", base, self.friendly_list(args)),
        }
    }

    /// Friendly name of a possibly unresolved type.
    pub fn friendly_name_or_unknown(&self, ty: Option<SymbolId>) -> String {
        ty.map_or_else(|| "?".to_string(), |ty| self.friendly_name(ty))
    }

    pub fn friendly_list(&self, types: &[SymbolId]) -> String {
        types
            .iter()
            .map(|&ty| self.friendly_name(ty))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `name(Integer, String) <- Boolean`
    pub fn signature_display(&self, callable: SymbolId) -> String {
        let params = self
            .param_types(callable)
            .iter()
            .map(|&ty| self.friendly_name_or_unknown(ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}({}) <- {}",
            self.name_of(callable),
            params,
            self.friendly_name_or_unknown(self.return_type(callable))
        )
    }
}
