//! Block Kinds
//!
//! The closed set of block types the generator understands, and the
//! connection shape each of them exposes in the editor.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

use crate::error::GenerationError;

bitflags! {
    /// Connection points a block offers to its neighbours.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockShape: u8 {
        /// Produces a value that plugs into a value input.
        const OUTPUT = 0b0001;
        /// Can follow another statement.
        const PREVIOUS = 0b0010;
        /// Can be followed by another statement.
        const NEXT = 0b0100;

        const STATEMENT = Self::PREVIOUS.bits() | Self::NEXT.bits();
    }
}

macro_rules! block_kinds {
    ($($variant:ident => $tag:literal),* $(,)?) => {
        /// Every block type known to the generator, keyed by its editor type tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BlockKind {
            $($variant,)*
        }

        impl BlockKind {
            /// Type tag used by the editor serialization.
            pub fn tag(self) -> &'static str {
                match self {
                    $(BlockKind::$variant => $tag,)*
                }
            }
        }

        impl FromStr for BlockKind {
            type Err = GenerationError;

            fn from_str(tag: &str) -> Result<Self, Self::Err> {
                match tag {
                    $($tag => Ok(BlockKind::$variant),)*
                    other => Err(GenerationError::UnknownBlockType(other.to_string())),
                }
            }
        }
    };
}

block_kinds! {
    // Mynewt device blocks
    OnStart => "on_start",
    Forever => "forever",
    Wait => "wait",
    DigitalTogglePin => "digital_toggle_pin",
    DigitalReadPin => "digital_read_pin",
    DigitalWritePin => "digital_write_pin",
    // CoAP payload
    Coap => "coap",
    Field => "field",
    // App widgets
    App => "app",
    Label => "label",
    Button => "button",
    // Logic
    ControlsIf => "controls_if",
    ControlsIfElse => "controls_ifelse",
    LogicCompare => "logic_compare",
    LogicOperation => "logic_operation",
    LogicNegate => "logic_negate",
    LogicBoolean => "logic_boolean",
    LogicNull => "logic_null",
    LogicTernary => "logic_ternary",
    // Math
    MathNumber => "math_number",
    MathArithmetic => "math_arithmetic",
    MathSingle => "math_single",
    MathRound => "math_round",
    MathTrig => "math_trig",
    MathConstant => "math_constant",
    MathNumberProperty => "math_number_property",
    MathChange => "math_change",
    MathModulo => "math_modulo",
    MathConstrain => "math_constrain",
    MathRandomInt => "math_random_int",
    MathOnList => "math_on_list",
    // Text
    Text => "text",
    TextJoin => "text_join",
    TextAppend => "text_append",
    TextLength => "text_length",
    TextIsEmpty => "text_isEmpty",
    TextCharAt => "text_charAt",
    TextChangeCase => "text_changeCase",
    TextCount => "text_count",
    TextPrint => "text_print",
    // Variables
    VariablesGet => "variables_get",
    VariablesSet => "variables_set",
    // Procedures
    ProceduresDefReturn => "procedures_defreturn",
    ProceduresDefNoReturn => "procedures_defnoreturn",
    ProceduresCallReturn => "procedures_callreturn",
    ProceduresCallNoReturn => "procedures_callnoreturn",
    ProceduresIfReturn => "procedures_ifreturn",
}

impl BlockKind {
    pub fn shape(self) -> BlockShape {
        use BlockKind::*;
        match self {
            OnStart | Forever | ProceduresDefReturn | ProceduresDefNoReturn => BlockShape::empty(),
            Wait
            | DigitalTogglePin
            | DigitalWritePin
            | ControlsIf
            | ControlsIfElse
            | MathChange
            | TextAppend
            | TextPrint
            | VariablesSet
            | ProceduresCallNoReturn
            | ProceduresIfReturn => BlockShape::STATEMENT,
            DigitalReadPin | Coap | Field | App | Label | Button | LogicCompare
            | LogicOperation | LogicNegate | LogicBoolean | LogicNull | LogicTernary
            | MathNumber | MathArithmetic | MathSingle | MathRound | MathTrig | MathConstant
            | MathNumberProperty | MathModulo | MathConstrain | MathRandomInt | MathOnList
            | Text | TextJoin | TextLength | TextIsEmpty | TextCharAt | TextChangeCase
            | TextCount | VariablesGet | ProceduresCallReturn => BlockShape::OUTPUT,
        }
    }

    pub fn has_output(self) -> bool {
        self.shape().contains(BlockShape::OUTPUT)
    }

    pub fn is_procedure_definition(self) -> bool {
        matches!(
            self,
            BlockKind::ProceduresDefReturn | BlockKind::ProceduresDefNoReturn
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
