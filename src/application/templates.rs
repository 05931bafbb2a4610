//! WhatsApp reply templates

/// Welcome text with the service list
pub fn main_menu(sender_name: &str) -> String {
    format!(
        "👋 Welcome to *MuntuShop*, {sender_name}!\n\n\
         🛍️ *Our Services:*\n\n\
         1️⃣  Shopping (Dropshipping Store)\n\
         2️⃣  Bulk Messaging Service\n\
         3️⃣  Customer Support Assistant\n\
         4️⃣  Appointment Booking\n\
         5️⃣  Group Management\n\
         6️⃣  Money Transfer Assistant\n\
         7️⃣  Online Courses\n\
         8️⃣  Local News & Updates\n\
         9️⃣  Marketing Services\n\
         🔟  B2B Wholesale Orders\n\
         1️⃣1️⃣ IPTV Subscriptions\n\n\
         📝 *Commands:*\n\
         • Type a number (1-11) to access a service\n\
         • Type 'menu' to see this menu again\n\
         • Type 'help' for support\n\n\
         💬 How can we help you today?"
    )
}

pub fn shopping_menu() -> String {
    "🛍️ *Shopping Service*\n\n\
     Browse our catalog and order products!\n\n\
     📋 *Options:*\n\
     • Type 'browse' to see products\n\
     • Type 'cart' to view your cart\n\
     • Type 'orders' to see your orders\n\
     • Type 'menu' to go back\n"
        .to_string()
}

pub fn iptv_menu() -> String {
    "📺 *IPTV Subscription Service*\n\n\
     Choose your package:\n\n\
     1️⃣  Basic - $5/month\n\
     2️⃣  Premium - $10/month\n\
     3️⃣  Ultra - $15/month\n\n\
     Type the package number to subscribe!\n\
     Type 'menu' to go back"
        .to_string()
}

pub fn help_message() -> String {
    "🆘 *MuntuShop Support*\n\n\
     Need help? Here's what you can do:\n\n\
     📞 Contact Support:\n\
     • Email: support@muntushop.com\n\
     • WhatsApp: +1234567890\n\n\
     💡 *Common Commands:*\n\
     • 'start' - Main menu\n\
     • 'menu' - Show menu\n\
     • 'help' - This message\n\n\
     Type 'menu' to return to main menu"
        .to_string()
}

pub const GREETING: &str = "👋 Hello! Type 'start' to see our services!";

pub const THANKS: &str = "🙏 You're welcome! How else can we help? Type 'menu' for options.";

pub const NOT_UNDERSTOOD: &str =
    "🤔 I didn't understand that. Type 'start' to see our services or 'help' for support.";
