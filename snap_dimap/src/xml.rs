/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use quick_xml::{Reader, events::{BytesStart, Event}};
use crate::errors::{Result, xml_error};

/// a minimal owned XML element tree, built from quick-xml events.
///
/// This only holds what we need to interpret Dimap documents: tag names, attributes, direct text
/// content and child elements in document order. Namespace prefixes are kept as part of the name.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String,String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {

    /// parse a complete XML document and return its root element. This fails if the input is not
    /// well-formed (mismatched or unclosed tags, more than one root, broken attributes or entities,
    /// characters outside of the XML 1.0 `Char` range, invalid names or "--" inside of comments)
    pub fn parse (xml: &str)->Result<XmlElement> {
        check_chars( xml, "document")?;

        let mut reader = Reader::from_str( xml);
        reader.config_mut().trim_text( true);

        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    check_no_root_yet( &root, &open)?;
                    open.push( XmlElement::from_start( &e)?);
                }
                Ok(Event::Empty(e)) => {
                    check_no_root_yet( &root, &open)?;
                    let elem = XmlElement::from_start( &e)?;
                    close_element( &mut open, &mut root, elem);
                }
                Ok(Event::End(_)) => { // the reader already checks that end names match
                    let elem = open.pop().ok_or_else( || xml_error("unmatched end tag"))?;
                    close_element( &mut open, &mut root, elem);
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape()?;
                    check_chars( &text, "text")?; // character references are not covered by the document check
                    add_text( &mut open, &text)?;
                }
                Ok(Event::CData(c)) => {
                    let bytes = c.into_inner();
                    add_text( &mut open, &String::from_utf8_lossy( &bytes))?;
                }
                Ok(Event::Comment(c)) => check_comment( &c)?,
                Ok(Event::Eof) => break,
                Ok(_) => {} // declaration, processing instructions and doctype
                Err(e) => {
                    return Err( xml_error( format!("{e} (at position {})", reader.error_position())))
                }
            }
        }

        if let Some(elem) = open.last() {
            return Err( xml_error( format!("unclosed element <{}>", elem.name)))
        }
        root.ok_or_else( || xml_error("no root element"))
    }

    fn from_start (e: &BytesStart)->Result<XmlElement> {
        let name = String::from_utf8_lossy( e.name().as_ref()).into_owned();
        check_name( &name)?;

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err( |err| xml_error( format!("invalid attribute in <{name}>: {err}")))?;
            let key = String::from_utf8_lossy( attr.key.as_ref()).into_owned();
            check_name( &key)?;
            let value = attr.unescape_value()?.into_owned();
            check_chars( &value, "attribute value")?;
            attributes.push( (key,value));
        }

        Ok( XmlElement { name, attributes, text: None, children: Vec::new() } )
    }

    pub fn name (&self)->&str {
        &self.name
    }

    pub fn attribute (&self, key: &str)->Option<&str> {
        self.attributes.iter().find( |(k,_)| k == key).map( |(_,v)| v.as_str())
    }

    pub fn attributes (&self)->&[(String,String)] {
        &self.attributes
    }

    /// the (trimmed) text content directly contained in this element, if any
    pub fn text (&self)->Option<&str> {
        self.text.as_deref()
    }

    pub fn children (&self)->&[XmlElement] {
        &self.children
    }

    /// first direct child with the given name
    pub fn find_child (&self, name: &str)->Option<&XmlElement> {
        self.children.iter().find( |c| c.name == name)
    }

    /// all elements with the given name below this one, in document order
    pub fn descendants<'a> (&'a self, name: &str)->Vec<&'a XmlElement> {
        let mut list = Vec::new();
        self.collect_descendants( name, &mut list);
        list
    }

    fn collect_descendants<'a> (&'a self, name: &str, list: &mut Vec<&'a XmlElement>) {
        for c in &self.children {
            if c.name == name { list.push(c) }
            c.collect_descendants( name, list);
        }
    }
}

fn check_no_root_yet (root: &Option<XmlElement>, open: &[XmlElement])->Result<()> {
    if root.is_some() && open.is_empty() {
        Err( xml_error("more than one root element"))
    } else {
        Ok(())
    }
}

fn close_element (open: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, elem: XmlElement) {
    if let Some(parent) = open.last_mut() {
        parent.children.push( elem);
    } else {
        *root = Some(elem);
    }
}

fn add_text (open: &mut [XmlElement], text: &str)->Result<()> {
    if let Some(elem) = open.last_mut() {
        match &mut elem.text {
            Some(s) => s.push_str( text),
            None => elem.text = Some(text.to_string())
        }
        Ok(())
    } else if text.trim().is_empty() {
        Ok(())
    } else {
        Err( xml_error("text outside of root element"))
    }
}

/// the XML 1.0 `Char` production (Rust chars already exclude surrogates)
fn is_xml_char (c: char)->bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => false,
        _ => true
    }
}

fn is_name_start_char (c: char)->bool {
    matches!( c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{c0}'..='\u{d6}' | '\u{d8}'..='\u{f6}' | '\u{f8}'..='\u{2ff}' |
        '\u{370}'..='\u{37d}' | '\u{37f}'..='\u{1fff}' | '\u{200c}'..='\u{200d}' |
        '\u{2070}'..='\u{218f}' | '\u{2c00}'..='\u{2fef}' | '\u{3001}'..='\u{d7ff}' |
        '\u{f900}'..='\u{fdcf}' | '\u{fdf0}'..='\u{fffd}' | '\u{10000}'..='\u{effff}'
    )
}

fn is_name_char (c: char)->bool {
    is_name_start_char(c) || matches!( c,
        '-' | '.' | '0'..='9' | '\u{b7}' | '\u{300}'..='\u{36f}' | '\u{203f}'..='\u{2040}'
    )
}

fn check_chars (s: &str, what: &str)->Result<()> {
    match s.char_indices().find( |(_,c)| !is_xml_char(*c)) {
        Some((i,c)) => Err( xml_error( format!("invalid character {:#x} in {what} (at position {i})", c as u32))),
        None => Ok(())
    }
}

fn check_name (name: &str)->Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) => is_name_start_char(c) && chars.all( is_name_char),
        None => false
    };
    if valid { Ok(()) } else { Err( xml_error( format!("invalid name '{name}'"))) }
}

fn check_comment (content: &[u8])->Result<()> {
    if content.windows(2).any( |w| w == b"--") || content.last() == Some(&b'-') {
        Err( xml_error("'--' inside of comment"))
    } else {
        Ok(())
    }
}
