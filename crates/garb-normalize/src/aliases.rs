//! Field-name alias tables.
//!
//! The SOAP vendor has shipped at least four spellings for most fields
//! over the years (`SKU`, `Sku`, `PartNumber`, …), sometimes more than
//! one inside a single response. The tables below list every spelling
//! observed in captured payloads, most common first; matching is exact
//! and case-sensitive, in list order. Alias data lives here, not in the
//! mapper, so a new WSDL revision is a one-line table edit.

/// Ordered, case-sensitive spellings for each canonical field.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    pub sku: &'static [&'static str],
    pub brand: &'static [&'static str],
    pub style: &'static [&'static str],
    pub color: &'static [&'static str],
    pub size: &'static [&'static str],
    pub title: &'static [&'static str],
    pub price: &'static [&'static str],
    pub image_front: &'static [&'static str],
    pub image_back: &'static [&'static str],
}

/// Spellings observed across SanMar WSDL revisions.
pub const SANMAR_ALIASES: AliasTable = AliasTable {
    sku: &[
        "SKU",
        "Sku",
        "PartNumber",
        "PartNo",
        "StyleNumber",
        "StyleNo",
        "ItemNumber",
        "ItemNo",
        "Id",
        "ID",
    ],
    brand: &["Brand", "BrandName", "brand", "brandName", "MillName", "Mill"],
    style: &["Style", "StyleName", "style", "styleName", "StyleNumber", "StyleNo"],
    color: &[
        "Color",
        "ColorName",
        "color",
        "colorName",
        "CatalogColor",
        "ColorDescription",
    ],
    size: &["Size", "SizeName", "size", "sizeName", "SizeLabel", "SizeDescription"],
    title: &[
        "Title",
        "ProductTitle",
        "ProductName",
        "title",
        "Description",
        "ShortDescription",
    ],
    price: &[
        "Price",
        "CustomerPrice",
        "PiecePrice",
        "CasePrice",
        "SalePrice",
        "Msrp",
        "MSRP",
        "RetailPrice",
    ],
    image_front: &[
        "ImageFront",
        "FrontImage",
        "ColorFrontImage",
        "colorFrontImage",
        "FrontModelImageUrl",
        "ImageUrl",
        "ImageURL",
        "Image",
    ],
    image_back: &[
        "ImageBack",
        "BackImage",
        "ColorBackImage",
        "colorBackImage",
        "BackModelImageUrl",
    ],
};
