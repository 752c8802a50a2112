use crate::error::{InvoiceError, Result};
use image::DynamicImage;
use listing_invoice_common::export::{DocumentPlan, Element};
use listing_invoice_common::layout::Rgb as PlanColor;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};
use std::io::BufWriter;

/// 画像の基準解像度
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// 配置済みの文書をPDFに書き出す
///
/// `image` は配置計算時に画像を渡した場合のみ Some。
pub fn write_pdf(plan: &DocumentPlan, image: Option<&DynamicImage>) -> Result<Vec<u8>> {
    let page_w = plan.layout.page_width_mm;
    let page_h = plan.layout.page_height_mm;

    let (doc, page1, layer1) = PdfDocument::new(&plan.title, Mm(page_w), Mm(page_h), "Layer 1");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| InvoiceError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| InvoiceError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?,
    };

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page_idx, layer_idx) = doc.add_page(Mm(page_w), Mm(page_h), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for element in &page.elements {
            draw_element(&layer, element, &fonts, image, page_h);
        }
    }

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buf);
        doc.save(&mut writer)
            .map_err(|e| InvoiceError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;
    }
    Ok(buf)
}

fn draw_element(
    layer: &PdfLayerReference,
    element: &Element,
    fonts: &Fonts,
    image: Option<&DynamicImage>,
    page_h: f32,
) {
    match element {
        Element::Text { text, x_mm, y_mm, font_pt, bold, color } => {
            if text.is_empty() {
                return;
            }
            layer.set_fill_color(pdf_color(*color));
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.use_text(text.as_str(), *font_pt, Mm(*x_mm), Mm(page_h - *y_mm), font);
        }
        Element::Rect { x_mm, y_mm, width_mm, height_mm, fill } => {
            layer.set_fill_color(pdf_color(*fill));
            let rect = Rect::new(
                Mm(*x_mm),
                Mm(page_h - *y_mm - *height_mm),
                Mm(*x_mm + *width_mm),
                Mm(page_h - *y_mm),
            )
            .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
        Element::Image { x_mm, y_mm, width_mm, height_mm } => {
            // 配置計算と画像は常にセットで渡される
            let Some(source) = image else { return };
            let (scale_x, scale_y) = image_scale(source.width(), source.height(), *width_mm, *height_mm);
            // アルファ付き画像はRGBに落としてから埋め込む
            let rgb = DynamicImage::ImageRgb8(source.to_rgb8());
            Image::from_dynamic_image(&rgb).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(*x_mm)),
                    translate_y: Some(Mm(page_h - *y_mm - *height_mm)),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    dpi: Some(IMAGE_DPI),
                    ..Default::default()
                },
            );
        }
    }
}

/// 基準解像度での自然サイズから目標サイズへの倍率
fn image_scale(pixel_width: u32, pixel_height: u32, width_mm: f32, height_mm: f32) -> (f32, f32) {
    let natural_w = pixel_width.max(1) as f32 / IMAGE_DPI * MM_PER_INCH;
    let natural_h = pixel_height.max(1) as f32 / IMAGE_DPI * MM_PER_INCH;
    (width_mm / natural_w, height_mm / natural_h)
}

fn pdf_color(color: PlanColor) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}
