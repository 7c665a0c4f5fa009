use crate::refs::{ObjectReferences, RefType};
use crate::units::Px;
use crate::CardError;
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded
/// in their entirety in the generated PDF, so large fonts (a full CJK face,
/// say) may dramatically increase the size of the output.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the face could not
    /// be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, CardError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// The full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The family name of the font, if it carries one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn units_scaling(&self, size: Px) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.face.as_face_ref().ascender() as f32 * self.units_scaling(size))
    }

    /// Distance from the baseline to the bottom of the font at the given
    /// size. Usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.face.as_face_ref().descender() as f32 * self.units_scaling(size))
    }

    /// The font's natural line height at the given size: leading plus ascent
    /// minus descent
    pub fn line_height(&self, size: Px) -> Px {
        let scaling = self.units_scaling(size);
        let face = self.face.as_face_ref();
        Px((face.line_gap() as f32 + face.ascender() as f32 - face.descender() as f32) * scaling)
    }

    /// The glyph for `ch`, falling back to the replacement character when the
    /// face has no direct mapping
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .map(|gid| gid.0)
    }

    /// The horizontal advance of `ch` at the given size. Characters the face
    /// cannot draw advance by nothing
    pub fn char_advance(&self, ch: char, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let advance = self
            .glyph_id(ch)
            .and_then(|gid| face.glyph_hor_advance(owned_ttf_parser::GlyphId(gid)))
            .unwrap_or_default();
        Px(advance as f32 * self.units_scaling(size))
    }

    /// The width of a run of text at the given size, ignoring newlines
    pub fn text_width(&self, text: &str, size: Px) -> Px {
        text.chars().map(|ch| self.char_advance(ch, size)).sum()
    }

    /// Every glyph the face maps from unicode, as (glyph id, char) pairs
    /// sorted by glyph id
    fn unicode_glyphs(&self) -> Vec<(u16, char)> {
        let mut glyphs: Vec<(u16, char)> = Vec::new();
        if let Some(cmap) = self.face.as_face_ref().tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
                subtable.codepoints(|codepoint: u32| {
                    if let Ok(ch) = char::try_from(codepoint) {
                        if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                            glyphs.push((gid.0, ch));
                        }
                    }
                });
            }
        }
        glyphs.sort_unstable();
        glyphs.dedup_by_key(|&mut (gid, _)| gid);
        glyphs
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        // ttf-parser exposes no stem information; this is Acrobat's usual guess
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        // glyph widths, grouped into runs of consecutive glyph ids
        let glyph_widths: Vec<(u16, f32)> = self
            .unicode_glyphs()
            .into_iter()
            .filter_map(|(gid, _)| {
                face.glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect();

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (gid, width) in glyph_widths {
            match run_start {
                Some(start) if (gid - start) as usize == run.len() => run.push(width),
                _ => {
                    if let Some(start) = run_start {
                        widths.consecutive(start, run.drain(..));
                    }
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#,
        );

        // bfchar blocks are limited to 100 entries apiece
        for block in self.unicode_glyphs().chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                map.push_str(&format!("<{gid:04x}> <{:04x}>\n", u32::from(ch)));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}
