#![forbid(unsafe_code)]

//! Built-in message tables.

pub(crate) const EN: &[(&str, &str)] = &[
    ("generic", "Please enter a correct value"),
    ("required", "Please fill in this required field"),
    ("email", "Please specify valid E-Mail address"),
    ("minlength", "Please enter a value not less than {0} characters"),
    ("maxlength", "Please enter a value not greater than {0} characters"),
    ("number", "Please enter a correct number"),
    ("min", "Please enter a number not less than {0}"),
    ("max", "Please enter a number not greater than {0}"),
    ("pattern", "Please enter a correct value according to specified rules"),
    ("url", "Please enter a valid URL address"),
];

pub(crate) const RU: &[(&str, &str)] = &[
    ("generic", "Пожалуйста введите корректное значение"),
    ("required", "Пожалуйста заполните это обязательное поле"),
    ("email", "Пожалуйста укажите корректный E-Mail адрес"),
    ("minlength", "Пожалуйста укажите значение не короче {0} символов"),
    ("maxlength", "Пожалуйста укажите значение не длиннее {0} символов"),
    ("number", "Пожалуйста введите корректное число"),
    ("min", "Пожалуйста укажите число не меньше чем {0}"),
    ("max", "Пожалуйста укажите число не больше чем {0}"),
    (
        "pattern",
        "Пожалуйста введите значение в соответствии с указанными требованиями",
    ),
    ("url", "Пожалуйста укажите корректный URL адрес"),
];
