// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::{Display, Formatter};

use swimos_codec::{FmtOutput, Writer, Writing};
use swimos_model::Value;

use crate::writer::ModelWriter;

struct ReconPrinter<'a>(&'a Value);

impl<'a> Display for ReconPrinter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut output = FmtOutput::new(f);
        let mut writer = (&ModelWriter).write_value(self.0);
        loop {
            match writer.pull(&mut output) {
                Writing::Done => break Ok(()),
                Writing::Cont(w) => writer = w,
                Writing::Error(_) => break Err(std::fmt::Error),
            }
        }
    }
}

/// Format a value as compact Recon.
///
/// #Examples
///
/// ```
/// use swimos_model::{Item, Value};
/// use swimos_recon::print_recon;
///
/// let value = Value::from_vec(vec![Item::attr("foo"), Item::slot("a", 1), Item::slot("b", 2)]);
/// assert_eq!(print_recon(&value).to_string(), "@foo{a:1,b:2}");
/// ```
pub fn print_recon(value: &Value) -> impl Display + '_ {
    ReconPrinter(value)
}

/// The number of characters in the Recon representation of a value.
pub fn recon_size(value: &Value) -> usize {
    ModelWriter.size_of_value(value)
}
