//! HTML signature template

use crate::types::ResolvedSignatureData;
use html_escape::{encode_double_quoted_attribute, encode_quoted_attribute};

/// Company site linked from the logo and contact block
pub const WEBSITE_URL: &str = "https://www.madaq.com";

const LOGO_URL: &str = "https://cdn.shopify.com/s/files/1/0729/8203/6780/files/Madaq-logo-donkerbruin-zwart.png?v=1684943708";
const FACEBOOK_URL: &str = "https://www.facebook.com/madak.chocolatier/";
const FACEBOOK_ICON: &str =
    "https://cdn.shopify.com/s/files/1/0729/8203/6780/files/facebook.png?v=1684920878";
const LINKEDIN_URL: &str = "https://nl.linkedin.com/company/madak";
const LINKEDIN_ICON: &str =
    "https://cdn.shopify.com/s/files/1/0729/8203/6780/files/linkedin.png?v=1684920878";
const INSTAGRAM_URL: &str = "https://www.instagram.com/madaqchocolates/";
const INSTAGRAM_ICON: &str =
    "https://cdn.shopify.com/s/files/1/0729/8203/6780/files/instagram.png?v=1684920878";

/// Postal address lines, rendered as-is
pub const POSTAL_ADDRESS: [&str; 2] = ["Florijnweg 23B", "6883 JN Velp"];

/// Render the signature table.
///
/// Free text is escaped for element content; hrefs and the thumbnail URL
/// are escaped for double-quoted attributes.
#[must_use]
pub fn render_signature_html(data: &ResolvedSignatureData) -> String {
    let full_name = encode_quoted_attribute(&data.full_name);
    let job_title = encode_quoted_attribute(&data.job_title);
    let phone_text = encode_quoted_attribute(&data.phone_display);
    let tel_href = encode_double_quoted_attribute(&data.tel_link);
    let email_text = encode_quoted_attribute(&data.company_email);
    let mailto_href = encode_double_quoted_attribute(&data.mailto_link);
    let fav_title = encode_quoted_attribute(&data.favourite_caption);
    let fav_bonbon = encode_quoted_attribute(&data.favourite_bonbon);
    let thumb_url = encode_double_quoted_attribute(&data.thumbnail.image_url);
    let thumb_label = encode_quoted_attribute(&data.thumbnail.label);
    let [street, city] = POSTAL_ADDRESS;
    let site_text = WEBSITE_URL.trim_start_matches("https://");

    format!(
        r##"
<div style="font-family: Avenir, Arial, Helvetica, sans-serif;">
    <p style="font-size: 11pt; margin: 0 0 10px 0;">Kind regards,</p>

    <table style="width: 800px; font-size: 11pt; font-family: Avenir, Arial, Helvetica, sans-serif;" cellpadding="0" cellspacing="0" border="0">
    <tbody>
     <tr>
        <td style="width:82px;" width="82">
            <p style="margin: 0px; padding: 0px;">
                <a href="https://madaq.com/" target="_blank" rel="noopener">
                    <img border="0" alt="Madaq Logo" width="80" style="width:80px; height:auto; border:0;"
                         src="{LOGO_URL}">
                </a>
            </p>
        </td>
        <td style="width: 15px;"></td>
        <td style="min-width: 200px; vertical-align: top;">
            <div style="font-weight: bold; font-size: 14pt; line-height: 16pt; color:#000000; margin-bottom: 5px;">
                {full_name}
            </div>
            <div style="color:#333333; font-size: 10pt; line-height: 14pt; margin-bottom: 10px;">
                {job_title}
            </div>

            <div style="margin-top: 10px;">
                <a href="{FACEBOOK_URL}" target="_blank" rel="noopener" style="margin-right: 5px;">
                    <img border="0" alt="Facebook" style="border:0; height:25px; width:25px;"
                         src="{FACEBOOK_ICON}">
                </a>
                <a href="{LINKEDIN_URL}" target="_blank" rel="noopener" style="margin-right: 5px;">
                    <img border="0" alt="LinkedIn" style="border:0; height:25px; width:25px;"
                         src="{LINKEDIN_ICON}">
                </a>
                <a href="{INSTAGRAM_URL}" target="_blank" rel="noopener">
                    <img border="0" alt="Instagram" style="border:0; height:25px; width:25px;"
                         src="{INSTAGRAM_ICON}">
                </a>
            </div>
        </td>
        <td style="width: 2px; border-right: 2px solid #412119; height: 80px;"></td>
        <td style="width: 15px;"></td>
        <td style="min-width: 175px; vertical-align: top;">
            <div style="font-size: 10pt; line-height: 14pt;">
                <div style="margin-bottom: 3px;">
                    <a href="{tel_href}" style="text-decoration:none; color:#333333;">{phone_text}</a>
                </div>
                <div style="margin-bottom: 3px;">
                    <a href="{mailto_href}" style="text-decoration: none; color:#333333;">{email_text}</a>
                </div>
                <div style="margin-bottom: 3px;">
                    <a href="{WEBSITE_URL}" style="text-decoration: none; color:#333333;">{site_text}</a>
                </div>
                <div style="color:#333333;">
                    {street}<br>
                    {city}
                </div>
            </div>
        </td>
        <td style="width: 2px; border-right: 2px solid #412119; height: 80px;"></td>
        <td style="width: 15px;"></td>
        <td style="width:67px;" width="67">
            <p style="margin: 0px; padding: 0px;">
                <a href="#" target="_blank" rel="noopener">
                    <img border="0" alt="{thumb_label}" width="67" style="width:67px; height:auto; border:0;"
                         src="{thumb_url}">
                </a>
            </p>
        </td>
        <td style="width: 15px;"></td>
        <td style="width: 160px; vertical-align: top;">
            <div style="color:#412119; font-weight: bold; font-size: 14pt; line-height: 16pt; margin-bottom: 5px;">
                {fav_title}
            </div>
            <div style="color:#412119; font-size: 10pt; line-height: 14pt; margin-bottom: 8px;">
                {fav_bonbon}
            </div>
            <div style="color:#412119; font-size: 10pt; line-height: 14pt;">
                What's yours?
            </div>
        </td>
     </tr>
    </tbody>
    </table>
</div>
"##
    )
}
