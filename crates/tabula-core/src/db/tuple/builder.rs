use crate::{
    db::tuple::{CodecError, Tuple, TupleDesc, codec},
    value::Value,
};
use std::ops::Range;

///
/// TupleBuilder
///
/// Reusable staging buffer for one tuple shape. Fields may be written in
/// any order; `build` emits them in descriptor order and recycles the
/// builder so the next tuple reuses the same allocations.
///

#[derive(Debug)]
pub struct TupleBuilder {
    desc: TupleDesc,
    buf: Vec<u8>,
    slots: Vec<Option<Range<usize>>>,
}

impl TupleBuilder {
    #[must_use]
    pub fn new(desc: TupleDesc) -> Self {
        let slots = vec![None; desc.count()];

        Self {
            desc,
            buf: Vec::new(),
            slots,
        }
    }

    #[must_use]
    pub const fn desc(&self) -> &TupleDesc {
        &self.desc
    }

    /// Copy pre-encoded bytes into field `i`; `None` writes null.
    pub fn put_raw(&mut self, i: usize, field: Option<&[u8]>) {
        let slot = field.filter(|bytes| !bytes.is_empty()).map(|bytes| {
            let start = self.buf.len();
            self.buf.extend_from_slice(bytes);
            start..self.buf.len()
        });
        self.slots[i] = slot;
    }

    /// Encode a logical value into field `i` using the descriptor's encoding.
    pub fn put(&mut self, i: usize, value: &Value) -> Result<(), CodecError> {
        let encoding = self.desc.field_type(i).encoding;
        let encoded = codec::encode_value(encoding, value)?;
        self.put_raw(i, encoded.as_deref());

        Ok(())
    }

    /// Finish the current tuple without nullability checks, then recycle.
    pub fn build(&mut self) -> Tuple {
        let tuple = Tuple::from_fields(
            self.slots
                .iter()
                .map(|slot| slot.clone().map(|range| &self.buf[range])),
        );
        self.recycle();

        tuple
    }

    /// Finish the current tuple, rejecting nulls in non-nullable fields.
    pub fn try_build(&mut self) -> Result<Tuple, CodecError> {
        if let Some(field) = self
            .slots
            .iter()
            .zip(self.desc.types())
            .position(|(slot, ty)| slot.is_none() && !ty.nullable)
        {
            self.recycle();
            return Err(CodecError::NullNotAllowed { field });
        }

        Ok(self.build())
    }

    /// Clear all staged fields while keeping allocations.
    pub fn recycle(&mut self) {
        self.buf.clear();
        self.slots.fill(None);
    }
}
