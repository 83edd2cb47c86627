use std::cell::Cell;

use super::opcode::symbolic::*;
use super::opcode::{Instruction, Offset, Opcode};

/// Instruction buffer for a single compilation scope.
///
/// Forward jumps are emitted with a zero placeholder operand and patched
/// with the absolute target offset when their [`Label`] is bound. Backward
/// jumps target a [`LoopHeader`] captured before the loop condition, so
/// their offset is known at emit time.
#[derive(Default)]
pub struct BytecodeBuilder {
  code: Vec<u8>,
  unbound_jumps: usize,
}

pub struct Label {
  name: &'static str,
  referrer_offset: Cell<Option<usize>>,
}

pub struct LoopHeader {
  offset: usize,
}

impl BytecodeBuilder {
  pub fn new() -> Self {
    Self {
      code: Vec::new(),
      unbound_jumps: 0,
    }
  }

  /// Emit an instruction.
  pub fn emit(&mut self, instruction: impl Instruction) {
    assert!(
      !instruction.is_jump(),
      "use `emit_jump`/`emit_jump_if_false` to emit jump instructions"
    );
    instruction.encode(&mut self.code);
  }

  /// Create an empty label.
  ///
  /// Used with `emit_jump` and `emit_jump_if_false`.
  pub fn label(&self, name: &'static str) -> Label {
    Label {
      name,
      referrer_offset: Cell::new(None),
    }
  }

  /// Emit a `Jump` with a placeholder operand, patched when `label` is
  /// bound.
  pub fn emit_jump(&mut self, label: &Label) {
    self.reserve_jump(label);
    Jump { offset: Offset(0) }.encode(&mut self.code);
  }

  /// Emit a `JumpIfFalse` with a placeholder operand, patched when
  /// `label` is bound.
  pub fn emit_jump_if_false(&mut self, label: &Label) {
    self.reserve_jump(label);
    JumpIfFalse { offset: Offset(0) }.encode(&mut self.code);
  }

  fn reserve_jump(&mut self, label: &Label) {
    assert!(
      label.referrer_offset.get().is_none(),
      "more than one instruction refers to label {} (referrers: {}, {})",
      label.name,
      label.referrer_offset.get().unwrap_or(0),
      self.code.len(),
    );

    self.unbound_jumps += 1;
    label.referrer_offset.set(Some(self.code.len()));
  }

  /// Patch the label's referrer to the current offset.
  pub fn bind_label(&mut self, label: Label) {
    let Some(referrer_offset) = label.referrer_offset.get() else {
      panic!("label {} bound without a referrer", label.name);
    };
    let target = self.code.len();
    assert!(
      target > referrer_offset,
      "label {} used for a backward jump",
      label.name
    );

    self.patch_jump(referrer_offset, target);
    self.unbound_jumps -= 1;
  }

  /// Marks the current offset as a loop header and returns it for use as
  /// a target in `emit_jump_loop`.
  pub fn loop_header(&self) -> LoopHeader {
    LoopHeader {
      offset: self.code.len(),
    }
  }

  pub fn emit_jump_loop(&mut self, header: &LoopHeader) {
    let offset = u16::try_from(header.offset).expect("loop header exceeds the u16 operand range");
    Jump { offset: Offset(offset) }.encode(&mut self.code);
  }

  /// Current length of the instruction buffer.
  pub fn offset(&self) -> usize {
    self.code.len()
  }

  pub fn finish(self) -> Vec<u8> {
    assert!(
      self.unbound_jumps == 0,
      "finished bytecode with {} unbound jumps",
      self.unbound_jumps
    );
    self.code
  }

  fn patch_jump(&mut self, referrer_offset: usize, target: usize) {
    match Opcode::try_from(self.code[referrer_offset]) {
      Ok(Opcode::Jump | Opcode::JumpIfFalse) => {}
      v => panic!("attempted to patch instruction {v:?} as a forward jump"),
    }

    let target = u16::try_from(target).expect("jump target exceeds the u16 operand range");
    let operand_offset = referrer_offset + 1;
    self.code[operand_offset..operand_offset + 2].copy_from_slice(&target.to_be_bytes());
  }
}
