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


use std::slice;

use swimos_codec::{Output, Writer, Writing};
use tracing::trace;

use super::ReconWriter;

/// Writes a sequence of record items, choosing between bare items, blocks enclosed in braces and
/// markup enclosed in brackets.
///
/// The writer looks ahead by one item. An item is written as follows:
///
/// 1. An attribute closes any open braces or brackets and is always written on its own.
/// 2. A text item followed by an item that is not a field, text or boolean opens markup. This
///    is disabled for the remainder of the sequence once an expression has been seen.
/// 3. Within markup, a markup-safe record is written inline (by a nested block writer) and text
///    is written as markup text. Anything else is written in braces.
/// 4. Within braces, items are separated by commas and slots are written as `key:value`.
/// 5. A value that is not a record is written bare if it is the last (but not first) item or it
///    is followed by an attribute.
/// 6. Anything else opens braces.
///
/// Every check of the output is followed by at most one character being written directly, so
/// the output does not depend on how the available capacity is divided.
pub struct BlockWriter<'a, R: ReconWriter + 'a> {
    recon: &'a R,
    items: slice::Iter<'a, R::Item>,
    in_block: bool,
    in_markup: bool,
    in_braces: bool,
    in_brackets: bool,
    first: bool,
    markup_safe: bool,
    next: Option<&'a R::Item>,
    step: BlockStep<'a, R>,
}

enum BlockStep<'a, R: ReconWriter + 'a> {
    NextItem,
    /// An attribute must close any open markup.
    BreakMarkup(&'a R::Item),
    CloseMarkup(&'a R::Item),
    Item(&'a R::Item),
    /// A markup-safe record, written inline in markup.
    NestedMarkup(Box<BlockWriter<'a, R>>),
    AfterNestedMarkup,
    Part(R::ItemWriter<'a>),
    /// A final text item, wrapped in brackets.
    TrailingText(R::ItemWriter<'a>),
    CloseTrailingText,
    CloseBraces,
    CloseBrackets,
}

impl<'a, R: ReconWriter + 'a> BlockWriter<'a, R> {
    /// # Arguments
    /// * `recon` - Strategy for classifying and writing the items.
    /// * `items` - The items to write.
    /// * `in_block` - Write the items bare, separated by commas, rather than enclosing them.
    /// * `in_markup` - The items are already within markup.
    pub fn new(recon: &'a R, items: &'a [R::Item], in_block: bool, in_markup: bool) -> Self {
        BlockWriter {
            recon,
            items: items.iter(),
            in_block,
            in_markup,
            in_braces: false,
            in_brackets: false,
            first: true,
            markup_safe: true,
            next: None,
            step: BlockStep::NextItem,
        }
    }

    /// The number of characters that will be written by the writer created by
    /// [`BlockWriter::new`] with the same arguments.
    pub fn size_of(recon: &R, items: &[R::Item], in_block: bool, in_markup: bool) -> usize {
        let mut size = 0;
        let mut in_braces = false;
        let mut in_brackets = false;
        let mut first = true;
        let mut markup_safe = true;
        let mut items = items.iter();
        let mut next = None;
        while let Some(item) = next.take().or_else(|| items.next()) {
            next = items.next();
            if recon.is_expression(item) {
                markup_safe = false;
            }
            if in_brackets && recon.is_attr(item) {
                if in_braces {
                    size += 1;
                    in_braces = false;
                }
                size += 1;
                in_brackets = false;
            }
            if recon.is_attr(item) {
                if in_braces {
                    size += 1;
                    in_braces = false;
                } else if in_brackets {
                    size += 1;
                    in_brackets = false;
                }
                size += recon.size_of_item(item);
                first = false;
            } else if in_brackets && recon.is_text(item) {
                if in_braces {
                    size += 1;
                    in_braces = false;
                }
                size += recon.size_of_markup_text(item);
            } else if in_braces {
                if !first {
                    size += 1;
                } else {
                    first = false;
                }
                size += size_of_block_item(recon, item);
            } else if in_brackets {
                if recon.is_record(item) && recon.is_markup_safe(recon.items(item)) {
                    size += BlockWriter::size_of(recon, recon.items(item), false, true);
                    match next {
                        Some(following) if recon.is_text(following) => {
                            size += recon.size_of_markup_text(following);
                            next = None;
                        }
                        Some(following) if !recon.is_attr(following) => {
                            size += 1;
                            in_braces = true;
                            first = true;
                        }
                        _ => {
                            size += 1;
                            in_brackets = false;
                        }
                    }
                } else {
                    size += 1 + recon.size_of_item(item);
                    in_braces = true;
                    first = false;
                }
            } else if markup_safe && recon.is_text(item) && opens_markup(recon, next) {
                size += 1 + recon.size_of_markup_text(item);
                in_brackets = true;
            } else if in_block && !in_braces {
                if !first {
                    size += 1;
                } else {
                    first = false;
                }
                size += size_of_block_item(recon, item);
            } else if in_markup && recon.is_text(item) && next.is_none() {
                size += 2 + recon.size_of_markup_text(item);
            } else if !in_markup && is_bare(recon, item, first, next) {
                if !first && needs_space(recon, item) {
                    size += 1;
                }
                size += recon.size_of_item(item);
            } else {
                size += 1 + recon.size_of_item(item);
                in_braces = true;
                first = false;
            }
        }
        if in_braces {
            size += 1;
        }
        if in_brackets {
            size += 1;
        }
        size
    }

    fn suspend<O: Output>(mut self, step: BlockStep<'a, R>, output: &mut O) -> Writing<Self> {
        self.step = step;
        Writing::stalled(self, output)
    }

    /// Choose how to write an item. At most one character is written to the output.
    fn begin_item<O: Output>(&mut self, item: &'a R::Item, output: &mut O) -> BlockStep<'a, R> {
        let recon = self.recon;
        if recon.is_attr(item) {
            if self.in_braces {
                output.write('}');
                self.in_braces = false;
            } else if self.in_brackets {
                output.write(']');
                self.in_brackets = false;
            }
            self.first = false;
            BlockStep::Part(recon.write_item(item))
        } else if self.in_brackets && recon.is_text(item) {
            if self.in_braces {
                output.write('}');
                self.in_braces = false;
            }
            BlockStep::Part(recon.write_markup_text(item))
        } else if self.in_braces {
            if !self.first {
                output.write(',');
            } else {
                self.first = false;
            }
            BlockStep::Part(write_block_item(recon, item))
        } else if self.in_brackets {
            if recon.is_record(item) && recon.is_markup_safe(recon.items(item)) {
                trace!("Writing a record inline within markup.");
                let nested = BlockWriter::new(recon, recon.items(item), false, true);
                BlockStep::NestedMarkup(Box::new(nested))
            } else {
                output.write('{');
                self.in_braces = true;
                self.first = false;
                BlockStep::Part(recon.write_item(item))
            }
        } else if self.markup_safe && recon.is_text(item) && opens_markup(recon, self.next) {
            output.write('[');
            self.in_brackets = true;
            BlockStep::Part(recon.write_markup_text(item))
        } else if self.in_block && !self.in_braces {
            if !self.first {
                output.write(',');
            } else {
                self.first = false;
            }
            BlockStep::Part(write_block_item(recon, item))
        } else if self.in_markup && recon.is_text(item) && self.next.is_none() {
            output.write('[');
            BlockStep::TrailingText(recon.write_markup_text(item))
        } else if !self.in_markup && is_bare(recon, item, self.first, self.next) {
            if !self.first && needs_space(recon, item) {
                output.write(' ');
            }
            BlockStep::Part(recon.write_item(item))
        } else {
            output.write('{');
            self.in_braces = true;
            self.first = false;
            BlockStep::Part(recon.write_item(item))
        }
    }
}

impl<'a, R: ReconWriter + 'a> Writer for BlockWriter<'a, R> {
    fn pull<O: Output>(mut self, output: &mut O) -> Writing<Self> {
        let recon = self.recon;
        let mut step = std::mem::replace(&mut self.step, BlockStep::NextItem);
        loop {
            step = match step {
                BlockStep::NextItem => match self.next.take().or_else(|| self.items.next()) {
                    Some(item) => {
                        self.next = self.items.next();
                        if recon.is_expression(item) {
                            self.markup_safe = false;
                        }
                        BlockStep::BreakMarkup(item)
                    }
                    None => BlockStep::CloseBraces,
                },
                BlockStep::BreakMarkup(item) => {
                    if !output.is_cont() {
                        return self.suspend(BlockStep::BreakMarkup(item), output);
                    }
                    if self.in_brackets && recon.is_attr(item) {
                        if self.in_braces {
                            output.write('}');
                            self.in_braces = false;
                        }
                        BlockStep::CloseMarkup(item)
                    } else {
                        BlockStep::Item(item)
                    }
                }
                BlockStep::CloseMarkup(item) => {
                    if !output.is_cont() {
                        return self.suspend(BlockStep::CloseMarkup(item), output);
                    }
                    output.write(']');
                    self.in_brackets = false;
                    BlockStep::Item(item)
                }
                BlockStep::Item(item) => {
                    if !output.is_cont() {
                        return self.suspend(BlockStep::Item(item), output);
                    }
                    self.begin_item(item, output)
                }
                BlockStep::NestedMarkup(nested) => match (*nested).pull(output) {
                    Writing::Done => BlockStep::AfterNestedMarkup,
                    Writing::Cont(nested) => {
                        return self.suspend(BlockStep::NestedMarkup(Box::new(nested)), output);
                    }
                    Writing::Error(err) => return Writing::Error(err),
                },
                BlockStep::AfterNestedMarkup => {
                    if !output.is_cont() {
                        return self.suspend(BlockStep::AfterNestedMarkup, output);
                    }
                    match self.next {
                        Some(following) if recon.is_text(following) => {
                            self.next = None;
                            BlockStep::Part(recon.write_markup_text(following))
                        }
                        Some(following) if !recon.is_attr(following) => {
                            output.write('{');
                            self.in_braces = true;
                            self.first = true;
                            BlockStep::NextItem
                        }
                        _ => {
                            output.write(']');
                            self.in_brackets = false;
                            BlockStep::NextItem
                        }
                    }
                }
                BlockStep::Part(part) => match part.pull(output) {
                    Writing::Done => BlockStep::NextItem,
                    Writing::Cont(part) => return self.suspend(BlockStep::Part(part), output),
                    Writing::Error(err) => return Writing::Error(err),
                },
                BlockStep::TrailingText(part) => match part.pull(output) {
                    Writing::Done => BlockStep::CloseTrailingText,
                    Writing::Cont(part) => {
                        return self.suspend(BlockStep::TrailingText(part), output);
                    }
                    Writing::Error(err) => return Writing::Error(err),
                },
                BlockStep::CloseTrailingText => {
                    if !output.is_cont() {
                        return self.suspend(BlockStep::CloseTrailingText, output);
                    }
                    output.write(']');
                    BlockStep::NextItem
                }
                BlockStep::CloseBraces => {
                    if self.in_braces {
                        if !output.is_cont() {
                            return self.suspend(BlockStep::CloseBraces, output);
                        }
                        output.write('}');
                        self.in_braces = false;
                    }
                    BlockStep::CloseBrackets
                }
                BlockStep::CloseBrackets => {
                    if self.in_brackets {
                        if !output.is_cont() {
                            return self.suspend(BlockStep::CloseBrackets, output);
                        }
                        output.write(']');
                        self.in_brackets = false;
                    }
                    return Writing::Done;
                }
            }
        }
    }
}

/// Text opens markup if it is followed by something other than a field, text or a boolean.
fn opens_markup<R: ReconWriter>(recon: &R, next: Option<&R::Item>) -> bool {
    next.map(|following| {
        !recon.is_field(following) && !recon.is_text(following) && !recon.is_bool(following)
    })
    .unwrap_or(false)
}

fn is_bare<R: ReconWriter>(recon: &R, item: &R::Item, first: bool, next: Option<&R::Item>) -> bool {
    let last_or_before_attr = match next {
        Some(following) => recon.is_attr(following),
        None => !first,
    };
    recon.is_value(item) && !recon.is_record(item) && last_or_before_attr
}

fn needs_space<R: ReconWriter>(recon: &R, item: &R::Item) -> bool {
    (recon.is_text(item) && recon.is_ident(item)) || recon.is_num(item) || recon.is_bool(item)
}

fn write_block_item<'a, R: ReconWriter>(recon: &'a R, item: &'a R::Item) -> R::ItemWriter<'a> {
    if recon.is_field(item) {
        if let (Some(key), Some(value)) = (recon.key(item), recon.value(item)) {
            return recon.write_slot(key, value);
        }
    }
    recon.write_item(item)
}

fn size_of_block_item<R: ReconWriter>(recon: &R, item: &R::Item) -> usize {
    match (recon.key(item), recon.value(item)) {
        (Some(key), Some(value)) if recon.is_field(item) => recon.size_of_slot(key, value),
        _ => recon.size_of_item(item),
    }
}
