//! Built-in field types and categories.
//!
//! This is the seed catalog every registry starts from. The keys, labels,
//! icons, placeholders and validation patterns are the product's stock
//! component set; hosts can extend or overwrite them through
//! [`FieldTypeRegistry::register_type`](crate::FieldTypeRegistry::register_type).

use serde_json::{json, Value};

use crate::types::{Category, FieldTypeDef, Formatter, ValidationRules};

fn def(key: &str, label: &str, icon: &str, description: &str, category: &str) -> FieldTypeDef {
    FieldTypeDef {
        key: key.into(),
        label: label.into(),
        icon: icon.into(),
        description: description.into(),
        category: category.into(),
        default_value: Value::String(String::new()),
        validation: ValidationRules::default(),
        placeholder: String::new(),
        formatter: None,
        options: None,
        rows: None,
        format: None,
    }
}

/// The built-in palette categories, in display order.
pub(crate) fn builtin_categories() -> Vec<(&'static str, Category)> {
    vec![
        (
            "BASIC",
            Category {
                label: "基础组件".into(),
                icon: "🔧".into(),
                order: 1,
            },
        ),
        (
            "IDENTITY",
            Category {
                label: "身份信息".into(),
                icon: "👤".into(),
                order: 2,
            },
        ),
        (
            "CONTACT",
            Category {
                label: "联系方式".into(),
                icon: "📞".into(),
                order: 3,
            },
        ),
        (
            "SELECTION",
            Category {
                label: "选择组件".into(),
                icon: "☑️".into(),
                order: 4,
            },
        ),
        (
            "ADVANCED",
            Category {
                label: "高级组件".into(),
                icon: "⚙️".into(),
                order: 5,
            },
        ),
    ]
}

/// The built-in field type table.
pub(crate) fn builtin_types() -> Vec<FieldTypeDef> {
    let mut types = Vec::new();

    // Basic components
    let mut text = def("text", "文本", "📝", "单行文本输入", "BASIC");
    text.placeholder = "请输入文本".into();
    types.push(text);

    let mut textarea = def("textarea", "文本域", "📄", "多行文本输入", "BASIC");
    textarea.placeholder = "请输入多行文本".into();
    textarea.rows = Some(4);
    types.push(textarea);

    let mut number = def("number", "数字", "🔢", "数字输入", "BASIC");
    number.default_value = Value::Null;
    number.validation.step = Some(1.0);
    number.placeholder = "请输入数字".into();
    types.push(number);

    let mut password = def("password", "密码", "🔒", "密码输入框", "BASIC");
    password.validation.min_length = Some(6);
    password.validation.max_length = Some(20);
    password.placeholder = "请输入密码".into();
    types.push(password);

    // Identity components
    let mut idcard = def("idcard", "身份证号", "🆔", "身份证号码输入", "IDENTITY");
    idcard.validation.pattern = Some(
        r"^[1-9]\d{5}(18|19|20)\d{2}((0[1-9])|(1[0-2]))(([0-2][1-9])|10|20|30|31)\d{3}[0-9Xx]$"
            .into(),
    );
    idcard.placeholder = "请输入18位身份证号码".into();
    idcard.formatter = Some(Formatter::Idcard);
    types.push(idcard);

    let mut username = def("username", "用户名", "👤", "用户名输入", "IDENTITY");
    username.validation.pattern = Some(r"^[a-zA-Z0-9_]{3,20}$".into());
    username.validation.min_length = Some(3);
    username.validation.max_length = Some(20);
    username.placeholder = "请输入用户名（3-20位字母数字下划线）".into();
    types.push(username);

    let mut realname = def("realname", "真实姓名", "📛", "真实姓名输入", "IDENTITY");
    realname.validation.pattern = Some("^[\u{4e00}-\u{9fa5}·]{2,10}$".into());
    realname.validation.min_length = Some(2);
    realname.validation.max_length = Some(10);
    realname.placeholder = "请输入真实姓名".into();
    types.push(realname);

    // Contact components
    let mut mobile = def("mobile", "手机号码", "📱", "手机号码输入", "CONTACT");
    mobile.validation.pattern = Some(r"^1[3-9]\d{9}$".into());
    mobile.placeholder = "请输入11位手机号码".into();
    mobile.formatter = Some(Formatter::Mobile);
    types.push(mobile);

    let mut email = def("email", "邮箱地址", "📧", "邮箱地址输入", "CONTACT");
    email.validation.pattern = Some(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$".into());
    email.placeholder = "请输入邮箱地址".into();
    types.push(email);

    let mut phone = def("phone", "固定电话", "☎️", "固定电话输入", "CONTACT");
    phone.validation.pattern = Some(r"^(\d{3,4}-)?\d{7,8}$".into());
    phone.placeholder = "请输入固定电话（如：010-12345678）".into();
    types.push(phone);

    let mut address = def("address", "地址", "🏠", "地址输入", "CONTACT");
    address.validation.min_length = Some(5);
    address.validation.max_length = Some(200);
    address.placeholder = "请输入详细地址".into();
    types.push(address);

    // Selection components
    let mut select = def("select", "下拉选择", "📋", "下拉选择框", "SELECTION");
    select.options = Some(Vec::new());
    select.placeholder = "请选择".into();
    types.push(select);

    let mut radio = def("radio", "单选框", "🔘", "单选按钮组", "SELECTION");
    radio.options = Some(Vec::new());
    types.push(radio);

    let mut checkbox = def("checkbox", "复选框", "☑️", "复选框组", "SELECTION");
    checkbox.default_value = json!([]);
    checkbox.options = Some(Vec::new());
    types.push(checkbox);

    // Date and time components
    let mut date = def("date", "日期", "📅", "日期选择", "ADVANCED");
    date.default_value = Value::Null;
    date.placeholder = "请选择日期".into();
    date.format = Some("YYYY-MM-DD".into());
    types.push(date);

    let mut datetime = def("datetime", "日期时间", "⏰", "日期和时间选择", "ADVANCED");
    datetime.default_value = Value::Null;
    datetime.placeholder = "请选择日期时间".into();
    datetime.format = Some("YYYY-MM-DD HH:mm:ss".into());
    types.push(datetime);

    let mut time = def("time", "时间", "🕐", "时间选择", "ADVANCED");
    time.default_value = Value::Null;
    time.placeholder = "请选择时间".into();
    time.format = Some("HH:mm:ss".into());
    types.push(time);

    // Advanced components
    let mut url = def("url", "网址链接", "🔗", "URL链接输入", "ADVANCED");
    url.validation.pattern = Some(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$"
            .into(),
    );
    url.placeholder = "请输入网址（如：https://example.com）".into();
    types.push(url);

    types
}

/// Base style and behavior properties every new field instance starts from.
pub fn base_properties() -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert("fontSize".into(), json!("14px"));
    props.insert("border".into(), json!("1px solid #dcdfe6"));
    props.insert("backgroundColor".into(), json!("#ffffff"));
    props.insert("color".into(), json!("#606266"));
    props.insert("required".into(), json!(false));
    props
}
