//! Static reference table of server outcome codes.
//!
//! # Design
//! Pure data contract: the service documents these codes as part of its
//! responses (the `ErrorCode` field and fault names), and callers interpret
//! them from the decoded payload themselves. The client never parses or
//! branches on them. Description and reason texts are reproduced verbatim
//! from the service documentation for compatibility.

/// One documented server outcome code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Numeric code, when the service assigns one. Fault-level outcomes
    /// (`InternalServiceFault`, `DeserializationFailed`,
    /// `AuthenticationError`) carry none.
    pub numeric_code: Option<i32>,
    pub system_name: &'static str,
    pub description: &'static str,
    pub reason: &'static str,
}

/// Every documented server outcome code, keyed by `system_name`.
pub const ERROR_CODES: &[ErrorCodeInfo] = &[
    ErrorCodeInfo {
        numeric_code: None,
        system_name: "InternalServiceFault",
        description: "Внутренняя ошибка сервера",
        reason: "Возникает при неизвестных или неверных действиях процессов SOAP - сервиса",
    },
    ErrorCodeInfo {
        numeric_code: None,
        system_name: "DeserializationFailed",
        description: "Внутренняя ошибка десериализации на сервере",
        reason: "Возникает при попытке передать запрос неверного формата, сервер не может десериализовать объект",
    },
    ErrorCodeInfo {
        numeric_code: None,
        system_name: "AuthenticationError",
        description: "Ошибка авторизации пользователя",
        reason: "Возникает, когда лоиг или пароль не верны, нет доступа к сервису, или возникают другие ошибки, запрещающие работу с сервисом",
    },
    ErrorCodeInfo {
        numeric_code: Some(-1),
        system_name: "CommonFail",
        description: "Ошибочный результат",
        reason: "Возникает при неизвестных ошибках, ошибках общего характера или внутренних ошибок сервера",
    },
    ErrorCodeInfo {
        numeric_code: Some(0),
        system_name: "Success",
        description: "Успешный результат",
        reason: "Данный код возвращается в параметре ErrorCode в случае успешного результата обработки запроса. Код не является ошибкой",
    },
    ErrorCodeInfo {
        numeric_code: Some(11),
        system_name: "NoSufficientRights",
        description: "У текущего пользователя недостаточно прав",
        reason: "Возникает при отправке посылок на доставку, в этом случае нужно связаться с техподдержкой Hermes-DPD",
    },
    ErrorCodeInfo {
        numeric_code: Some(14),
        system_name: "ParcelBarcodeIsNotFound",
        description: "Штрих-код посылки [{ParcelBarcode}] не найден",
        reason: "Штрих-код посылки не найден в системе",
    },
    ErrorCodeInfo {
        numeric_code: Some(20),
        system_name: "StringLength",
        description: "Поле {[StringField]} должно быть строкой с длиной от {[MinLength]} до {[MaxLength]} символов",
        reason: "Возникает, если строковое значения поле не соответствует указанной длине",
    },
    ErrorCodeInfo {
        numeric_code: Some(21),
        system_name: "Required",
        description: "Поле [{RequiredField}] должно быть обязательно для заполнения",
        reason: "Возникает, если не было заполнено обязательное для заполнения поле",
    },
    ErrorCodeInfo {
        numeric_code: Some(28),
        system_name: "Deserialization",
        description: "Ошибка десериализации объекта",
        reason: "Проверьте ваш запрос на наличие ошибок, прочитайте рекомендации к запросам",
    },
    ErrorCodeInfo {
        numeric_code: Some(30),
        system_name: "UnknownStatus",
        description: "Неизвестный статус",
        reason: "Возникает при попытке указать несуществующий статус",
    },
    ErrorCodeInfo {
        numeric_code: Some(31),
        system_name: "ManagementStatus",
        description: "Ошибка обработки статуса в системе",
        reason: "Означает, что при обработке статуса возникла ошибка",
    },
    ErrorCodeInfo {
        numeric_code: Some(32),
        system_name: "ApplyStatus",
        description: "Ошибка применения системного наименования статуса",
        reason: "При передаче статуса указан несопоставимое системное наименование статуса. Используйте таблицу Список доступных статусов посылок для проставления для решения ошибки",
    },
];

/// Look up a documented outcome code by its system name.
pub fn error_code(system_name: &str) -> Option<&'static ErrorCodeInfo> {
    ERROR_CODES.iter().find(|c| c.system_name == system_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_documented_codes() {
        assert_eq!(ERROR_CODES.len(), 13);
    }

    #[test]
    fn lookup_by_system_name() {
        let success = error_code("Success").unwrap();
        assert_eq!(success.numeric_code, Some(0));
        assert_eq!(success.description, "Успешный результат");

        let fault = error_code("InternalServiceFault").unwrap();
        assert_eq!(fault.numeric_code, None);

        assert_eq!(error_code("ApplyStatus").unwrap().numeric_code, Some(32));
    }

    #[test]
    fn unknown_system_name_is_none() {
        assert!(error_code("NoSuchCode").is_none());
    }

    #[test]
    fn numeric_codes_are_unique() {
        let mut seen = Vec::new();
        for code in ERROR_CODES.iter().filter_map(|c| c.numeric_code) {
            assert!(!seen.contains(&code), "duplicate numeric code {code}");
            seen.push(code);
        }
    }
}
