//! Name Registry
//!
//! Maps variable ids and procedure names to collision-free identifiers for
//! the generated file. Names handed out are never handed out again until
//! [`NameRegistry::reset`].

use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::fmt;

use crate::workspace::VariableModel;

/// Namespaces a key is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    Variable,
    DeveloperVariable,
    Procedure,
    /// App UI widget bindings.
    Widget,
}

impl fmt::Display for NameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameCategory::Variable => "VARIABLE",
            NameCategory::DeveloperVariable => "DEVELOPER_VARIABLE",
            NameCategory::Procedure => "PROCEDURE",
            NameCategory::Widget => "WIDGET",
        })
    }
}

lazy_static::lazy_static! {
    /// Identifiers user names must not shadow: Rust keywords, primitive
    /// types, and the items the file header and trailer declare.
    pub static ref RESERVED_WORDS: HashSet<&'static str> = {
        let words = concat!(
            // Keywords, strict and reserved
            "as,break,const,continue,crate,else,enum,extern,false,fn,for,if,impl,in,let,loop,",
            "match,mod,move,mut,pub,ref,return,self,Self,static,struct,super,trait,true,type,",
            "unsafe,use,where,while,async,await,dyn,abstract,become,box,do,final,macro,",
            "override,priv,typeof,unsized,virtual,yield,try,union,",
            // Primitive and prelude types
            "bool,char,str,i8,i16,i32,i64,i128,isize,u8,u16,u32,u64,u128,usize,f32,f64,",
            "Option,Some,None,Result,Ok,Err,",
            // Runtime items used by generated code
            "main,on_start,start_task,task_func,State,TASK_OBJ,TASK_STACK,TASK_STACK_SIZE,",
            "MynewtResult,Strn,Ptr,NULL,gpio,os,console,consts,core,mynewt,mynewt_macros,",
            "Column,Label,Button,Padding,Align,LocalizedString,col,text,label,button"
        );
        words.split(',').collect()
    };
}

#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    /// Normalized `(key, category)` to the identifier handed out.
    db: IndexMap<String, String>,
    /// Every identifier handed out so far.
    taken: IndexSet<String>,
    /// Variable id to editor name.
    variable_map: IndexMap<String, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every handed-out name. The variable map is kept.
    pub fn reset(&mut self) {
        self.db.clear();
        self.taken.clear();
    }

    pub fn set_variable_map(&mut self, variables: &[VariableModel]) {
        self.variable_map = variables
            .iter()
            .map(|v| (v.id.clone(), v.name.clone()))
            .collect();
    }

    /// Identifier for `key` in `category`. Repeated calls with the same key
    /// return the same identifier. Variable keys may be ids or names.
    pub fn get_name(&mut self, key: &str, category: NameCategory) -> String {
        let name = match category {
            NameCategory::Variable | NameCategory::DeveloperVariable => self
                .variable_map
                .get(key)
                .map(String::as_str)
                .unwrap_or(key)
                .to_string(),
            NameCategory::Procedure | NameCategory::Widget => key.to_string(),
        };
        let normalized = format!("{}_{}", name.to_lowercase(), category);
        if let Some(existing) = self.db.get(&normalized) {
            return existing.clone();
        }
        let distinct = self.get_distinct_name(&name, category);
        self.db.insert(normalized, distinct.clone());
        distinct
    }

    /// Fresh identifier derived from `name`, distinct from every identifier
    /// already handed out and from the reserved words.
    pub fn get_distinct_name(&mut self, name: &str, _category: NameCategory) -> String {
        let safe = safe_name(name);
        let mut candidate = safe.clone();
        let mut suffix = 1;
        while self.taken.contains(&candidate) || RESERVED_WORDS.contains(candidate.as_str()) {
            suffix += 1;
            candidate = format!("{}{}", safe, suffix);
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

/// Turn arbitrary editor text into an identifier: spaces become `_`,
/// characters outside `[A-Za-z0-9_]` become `_` or `_XX` byte escapes, and
/// a leading digit gets a `my_` prefix.
pub fn safe_name(name: &str) -> String {
    if name.is_empty() {
        return "unnamed".to_string();
    }
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            ' ' => out.push('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => out.push(c),
            c if c.is_ascii() && is_uri_safe(c) => out.push('_'),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("_{:02X}", byte));
                }
            }
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "my_");
    }
    out
}

/// Punctuation that survives URI encoding unescaped.
fn is_uri_safe(c: char) -> bool {
    matches!(
        c,
        ';' | ',' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | '-' | '.' | '!' | '~'
            | '*' | '\'' | '(' | ')' | '#'
    )
}
